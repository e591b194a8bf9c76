//! Classify command implementation.

use crate::cli::ClassifyArgs;
use crate::error::Result;
use crate::output::Formatter;
use taxzen_domain::{classify, ExtractionStrategy};

/// Execute the classify command.
pub fn execute_classify(args: ClassifyArgs, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_classifications(&classify_all(args.mime_types))?);
    Ok(())
}

fn classify_all(mime_types: Vec<String>) -> Vec<(String, ExtractionStrategy)> {
    mime_types
        .into_iter()
        .map(|mime| {
            let strategy = classify(&mime);
            (mime, strategy)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_all_keeps_order() {
        let entries = classify_all(vec![
            "text/csv".to_string(),
            "image/heic".to_string(),
            "application/zip".to_string(),
        ]);
        assert_eq!(
            entries.iter().map(|(_, s)| *s).collect::<Vec<_>>(),
            vec![
                ExtractionStrategy::Csv,
                ExtractionStrategy::OcrImage,
                ExtractionStrategy::RawText
            ]
        );
        assert_eq!(entries[1].0, "image/heic");
    }
}
