use extract_ttc::{ErrorClass, ExtractTtcError};

pub mod extract;
pub mod info;
pub mod list;

/// The library error class behind `err`, if it came from the library
fn error_class(err: &anyhow::Error) -> Option<ErrorClass> {
    err.downcast_ref::<ExtractTtcError>().map(ExtractTtcError::class)
}

/// Exit codes shared by `ls` and `info`: 1 read error, 2 invalid file, 3 anything else
fn inspect_exit_code(err: &anyhow::Error) -> u8 {
    match error_class(err) {
        Some(ErrorClass::Read) => 1,
        Some(ErrorClass::Invalid) => 2,
        _ => 3,
    }
}

fn display_error(err: &anyhow::Error) {
    eprintln!("Error: {err:#}");
}

#[cfg(test)]
mod tests {
    use std::io;

    use extract_ttc::ParseErrorKind;

    use super::*;

    #[test]
    fn inspect_codes() {
        let read = anyhow::Error::new(ExtractTtcError::ReadFailure(io::Error::other("boom")));
        let invalid = anyhow::Error::new(ExtractTtcError::InvalidContainer(ParseErrorKind::UnexpectedEof {
            position: 0,
        }));
        let other = anyhow::anyhow!("something else");

        assert_eq!(inspect_exit_code(&read), 1);
        assert_eq!(inspect_exit_code(&invalid), 2);
        assert_eq!(inspect_exit_code(&other), 3);
    }
}
