//! Spreadsheet target parsing.

use super::error::ExportError;

/// A worksheet inside a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTarget {
    /// Spreadsheet ID.
    pub spreadsheet_id: String,
    /// Worksheet (tab) name.
    pub worksheet: String,
}

impl SheetTarget {
    /// Builds a target from a spreadsheet URL or bare ID.
    ///
    /// URLs of the form `https://docs.google.com/spreadsheets/d/{id}/edit`
    /// yield `{id}`; anything without `/` is taken as the ID itself.
    pub fn parse(spreadsheet: &str, worksheet: &str) -> Result<Self, ExportError> {
        let spreadsheet = spreadsheet.trim();
        let worksheet = worksheet.trim();

        let id = match spreadsheet.split_once("/spreadsheets/d/") {
            Some((_, rest)) => rest.split(['/', '?', '#']).next().unwrap_or_default(),
            None if spreadsheet.contains('/') => "",
            None => spreadsheet,
        };

        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(ExportError::InvalidTarget(spreadsheet.to_string()));
        }
        if worksheet.is_empty() {
            return Err(ExportError::InvalidTarget("worksheet name is empty".to_string()));
        }

        Ok(Self {
            spreadsheet_id: id.to_string(),
            worksheet: worksheet.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        "https://docs.google.com/spreadsheets/d/1ZtA-gtrJnJc08yaOidn4EKds17yhEMjjATmRkPpMAE4/edit?usp=sharing",
        "1ZtA-gtrJnJc08yaOidn4EKds17yhEMjjATmRkPpMAE4"
    )]
    #[case("https://docs.google.com/spreadsheets/d/abc_123", "abc_123")]
    #[case("https://docs.google.com/spreadsheets/d/abc123#gid=0", "abc123")]
    #[case("  abc-123  ", "abc-123")]
    fn test_parse_spreadsheet_id(#[case] input: &str, #[case] expected: &str) {
        let target = SheetTarget::parse(input, "Sheet1").unwrap();

        assert_eq!(target.spreadsheet_id, expected);
        assert_eq!(target.worksheet, "Sheet1");
    }

    #[rstest]
    #[case("")]
    #[case("https://docs.google.com/document/d/abc/edit")]
    #[case("https://docs.google.com/spreadsheets/d//edit")]
    #[case("not an id")]
    fn test_parse_rejects_invalid(#[case] input: &str) {
        let err = SheetTarget::parse(input, "Sheet1").unwrap_err();

        assert!(matches!(err, ExportError::InvalidTarget(_)));
    }

    #[test]
    fn test_parse_rejects_empty_worksheet() {
        assert!(SheetTarget::parse("abc123", " ").is_err());
    }
}
