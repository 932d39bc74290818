use crate::matcher::FacetSelection;

/// Recommendation prompt. Facet values are embedded verbatim.
pub fn recommendation_prompt(sel: &FacetSelection, count: usize) -> String {
    let postcode = sel
        .postcode
        .map(|p| p.to_string())
        .unwrap_or_else(|| "any".into());
    format!(
        "Get me {count} native plants from the region with state: {} and postcode: {} \
that best match these requirements: plant_type:{}, plant_size:{}, flower_color:{}, plant_height:{}. \
Reply with only their scientific names, separated by a comma and a space.",
        sel.state, postcode, sel.plant_type, sel.size, sel.flower_color, sel.height,
    )
}

pub fn care_prompt(plant_name: &str) -> String {
    format!(
        "Get me care information for the plant: {plant_name}. \
Answer in two parts, one starting with \"Requirements:\" and one starting with \"Care:\"."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Facet;
    use crate::model::{PlantSize, UserState};

    #[test]
    fn embeds_selected_and_unselected_facets() {
        let sel = FacetSelection {
            state: Facet::Is(UserState::Nsw),
            size: Facet::Is(PlantSize::Small),
            flower_color: Facet::Is("Blue".into()),
            postcode: Some(2084),
            ..Default::default()
        };
        let p = recommendation_prompt(&sel, 3);
        assert!(p.starts_with("Get me 3 native plants from the region with state: NSW and postcode: 2084"));
        assert!(p.contains("plant_type:any, plant_size:Small, flower_color:Blue, plant_height:any"));
    }

    #[test]
    fn care_prompt_names_the_plant() {
        assert!(care_prompt("Acacia pycnantha").starts_with("Get me care information for the plant: Acacia pycnantha."));
    }
}
