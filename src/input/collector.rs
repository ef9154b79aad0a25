use crate::input::patterns::{is_address, is_tx_hash};
use crate::models::{AnalysisRequest, CsvFile, InputKind, ScanInput};
use crate::utils::ValidationError;

/// Raw user input for one submission, before validation
#[derive(Debug, Clone)]
pub enum SubmissionForm {
    Upload {
        address: String,
        file: Option<CsvFile>,
    },
    Payload {
        text: String,
    },
    Scan {
        kind: InputKind,
        text: String,
    },
}

/// What a form turns into once it passes validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedInput {
    Remote(AnalysisRequest),
    Scan(ScanInput),
}

impl SubmissionForm {
    pub fn validate(&self) -> Result<ValidatedInput, ValidationError> {
        match self {
            SubmissionForm::Upload { address, file } => {
                validate_upload(address, file.clone()).map(ValidatedInput::Remote)
            }
            SubmissionForm::Payload { text } => validate_payload(text).map(ValidatedInput::Remote),
            SubmissionForm::Scan { kind, text } => validate_scan(*kind, text).map(ValidatedInput::Scan),
        }
    }
}

/// Address + CSV mode
pub fn validate_upload(address: &str, file: Option<CsvFile>) -> Result<AnalysisRequest, ValidationError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(ValidationError::MissingAddress);
    }

    let file = file.ok_or(ValidationError::MissingFile)?;

    Ok(AnalysisRequest::Upload {
        address: address.to_string(),
        file,
    })
}

/// Raw JSON mode. The parsed value is passed through untouched.
pub fn validate_payload(text: &str) -> Result<AnalysisRequest, ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyPayload);
    }

    let value: serde_json::Value = serde_json::from_str(text).map_err(|e| {
        tracing::debug!("Rejected payload: {}", e);
        ValidationError::InvalidJson
    })?;

    Ok(AnalysisRequest::Payload(value))
}

/// Simulated scan mode
pub fn validate_scan(kind: InputKind, text: &str) -> Result<ScanInput, ValidationError> {
    let value = text.trim();
    if value.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    match kind {
        InputKind::Address if !is_address(value) => return Err(ValidationError::BadAddressFormat),
        InputKind::Transaction if !is_tx_hash(value) => return Err(ValidationError::BadHashFormat),
        _ => {}
    }

    Ok(ScanInput {
        kind,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn csv() -> CsvFile {
        CsvFile::new("tx.csv", b"from_address,to_address\n".to_vec())
    }

    #[test]
    fn test_upload_requires_address() {
        assert_eq!(validate_upload("   ", Some(csv())), Err(ValidationError::MissingAddress));
        assert_eq!(validate_upload("", None), Err(ValidationError::MissingAddress));
    }

    #[test]
    fn test_upload_requires_file() {
        assert_eq!(validate_upload("0xabc", None), Err(ValidationError::MissingFile));
    }

    #[test]
    fn test_upload_trims_address() {
        let request = validate_upload("  0xABC \n", Some(csv())).unwrap();
        assert_eq!(
            request,
            AnalysisRequest::Upload {
                address: "0xABC".into(),
                file: csv(),
            }
        );
    }

    #[test]
    fn test_payload_validation() {
        assert_eq!(validate_payload(" \t\n"), Err(ValidationError::EmptyPayload));
        assert_eq!(validate_payload("{bad"), Err(ValidationError::InvalidJson));
        assert_eq!(validate_payload("[1, 2,]"), Err(ValidationError::InvalidJson));
    }

    #[test]
    fn test_payload_passed_through() {
        let text = r#"{"address": "0x1234", "transactions": [{"from": "0x1234", "gasUsed": 21000}], "extra": true}"#;
        let request = validate_payload(text).unwrap();
        assert_eq!(
            request,
            AnalysisRequest::Payload(json!({
                "address": "0x1234",
                "transactions": [{"from": "0x1234", "gasUsed": 21000}],
                "extra": true
            }))
        );
    }

    #[test]
    fn test_scan_validation() {
        let address = format!("0x{}", "f".repeat(40));

        assert!(validate_scan(InputKind::Address, &address).is_ok());
        assert_eq!(
            validate_scan(InputKind::Transaction, &address),
            Err(ValidationError::BadHashFormat)
        );
        assert_eq!(validate_scan(InputKind::Address, "0x123"), Err(ValidationError::BadAddressFormat));
        assert_eq!(validate_scan(InputKind::Address, "  "), Err(ValidationError::EmptyInput));
    }

    #[test]
    fn test_form_dispatch() {
        let form = SubmissionForm::Payload { text: "{}".into() };
        assert_eq!(
            form.validate().unwrap(),
            ValidatedInput::Remote(AnalysisRequest::Payload(json!({})))
        );

        let form = SubmissionForm::Scan {
            kind: InputKind::Transaction,
            text: format!(" 0x{} ", "0".repeat(64)),
        };
        match form.validate().unwrap() {
            ValidatedInput::Scan(input) => assert_eq!(input.value.len(), 66),
            other => panic!("unexpected {:?}", other),
        }
    }
}
