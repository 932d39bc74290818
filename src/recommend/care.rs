use serde::Serialize;

const REQUIREMENTS: &str = "Requirements:";
const CARE: &str = "Care:";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CareInfo {
    pub requirements: String,
    pub care: String,
}

/// Splits labelled completion text. Unlabelled text is all care.
pub fn parse(text: &str) -> CareInfo {
    let text = text.trim();
    let after = |at: usize, label: &str| text[at + label.len()..].trim().to_string();
    let between = |from: usize, label: &str, to: usize| text[from + label.len()..to].trim().to_string();

    match (text.find(REQUIREMENTS), text.find(CARE)) {
        (Some(r), Some(c)) if r < c => CareInfo {
            requirements: between(r, REQUIREMENTS, c),
            care: after(c, CARE),
        },
        (Some(r), Some(c)) => CareInfo {
            requirements: after(r, REQUIREMENTS),
            care: between(c, CARE, r),
        },
        (Some(r), None) => CareInfo {
            requirements: after(r, REQUIREMENTS),
            care: String::new(),
        },
        (None, Some(c)) => CareInfo {
            requirements: String::new(),
            care: after(c, CARE),
        },
        (None, None) => CareInfo {
            requirements: String::new(),
            care: text.to_string(),
        },
    }
}
