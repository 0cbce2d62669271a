use super::types::Query;

const FORMAT_INSTRUCTIONS: &str = r#"The output should be a markdown code snippet formatted as a JSON array, one object per travel option, following this schema, including the leading and trailing "```json" and "```":

```json
[
  {
    "travel_mode": string  // Mode of transport (cab, train, bus, flight)
    "estimated_cost": string  // Estimated cost of travel in USD
    "duration": string  // Approximate travel time in hours
  }
]
```"#;

pub fn format_prompt(query: &Query, format_instructions: bool) -> String {
    let mut prompt = format!(
        "Find optimal travel options from {} to {}, including cab, train, bus, and flights with estimated cost.",
        query.source(),
        query.destination()
    );
    if format_instructions {
        prompt.push_str("\n\n");
        prompt.push_str(FORMAT_INSTRUCTIONS);
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_prompt_matches_template() {
        let q = Query::new("Pune", "Goa").unwrap();
        assert_eq!(
            format_prompt(&q, false),
            "Find optimal travel options from Pune to Goa, including cab, train, bus, and flights with estimated cost."
        );
    }

    #[test]
    fn instructions_name_every_field() {
        let q = Query::new("Pune", "Goa").unwrap();
        let prompt = format_prompt(&q, true);
        assert!(prompt.starts_with("Find optimal travel options from Pune to Goa"));
        for field in ["travel_mode", "estimated_cost", "duration"] {
            assert!(prompt.contains(field), "missing {field}");
        }
    }
}
