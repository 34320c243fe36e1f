use crate::chart::NatalChart;
use crate::error::AstroError;

pub const NATAL_HOROSCOPE_PROMPT: &str = "
You are a professional astrologer.
Based on the natal chart below, write a premium, psychologically nuanced horoscope.
Avoid vague statements. Be specific and empowering.

Chart:
{chart_json}
";

/// Prompt for a natal horoscope with the chart embedded as pretty JSON
pub fn natal_horoscope_prompt(chart: &NatalChart) -> Result<String, AstroError> {
    let chart_json = serde_json::to_string_pretty(chart)
        .map_err(|e| AstroError::calculation(format!("chart serialization failed: {e}")))?;
    Ok(NATAL_HOROSCOPE_PROMPT.replace("{chart_json}", &chart_json))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_chart_prompt() {
        let prompt = natal_horoscope_prompt(&NatalChart::default()).unwrap();
        assert!(prompt.starts_with("\nYou are a professional astrologer."));
        assert!(prompt.contains("\"planets\": []"));
        assert!(!prompt.contains("{chart_json}"));
    }
}
