//! Object key resolution
//!
//! Maps a local file path plus the active upload options to the key the
//! object will be stored under. Resolution is pure: the date stamp is
//! captured once when the resolver is built, so every file in one batch
//! shares the same prefix even if the run straddles midnight.
//!
//! Keys are built by naive concatenation. User-supplied folder and filename
//! values are not sanitized: `..`, leading slashes, and embedded separators
//! pass through untouched. This matches the permissive behavior of the
//! original tool and is deliberate; callers who need safe keys must
//! sanitize their inputs.

use std::path::Path;

use jiff::civil::Date;

use crate::batch::UploadRequest;
use crate::error::{Error, Result};

/// Resolves object keys for one batch invocation
#[derive(Debug, Clone)]
pub struct KeyResolver {
    /// Destination folder prefix, with trailing separator
    folder: String,
    /// Date prefix ("YYYY/MM/DD/"), captured at construction
    date: String,
    /// Subfolder named after the source directory, recursive mode only
    subfolder: String,
    /// Filename override; empty means "use the source basename"
    filename: String,
}

impl KeyResolver {
    /// Build a resolver for the given request, stamping today's local date
    pub fn new(request: &UploadRequest) -> Result<Self> {
        Self::with_date(request, jiff::Zoned::now().date())
    }

    /// Build a resolver with an explicit date (the batch date)
    pub fn with_date(request: &UploadRequest, today: Date) -> Result<Self> {
        if request.recursive && request.filename.is_some() {
            return Err(Error::InvalidOptions(
                "--filename cannot be combined with --recursive".into(),
            ));
        }

        let folder = match request.folder.as_deref() {
            Some(f) if !f.is_empty() => format!("{f}/"),
            _ => String::new(),
        };

        let date = if request.date_prefix {
            format!(
                "{:04}/{:02}/{:02}/",
                today.year(),
                today.month(),
                today.day()
            )
        } else {
            String::new()
        };

        let subfolder = if request.recursive && request.subfolder {
            format!("{}/", basename(&request.source))
        } else {
            String::new()
        };

        let filename = request.filename.clone().unwrap_or_default();

        Ok(Self {
            folder,
            date,
            subfolder,
            filename,
        })
    }

    /// Resolve the object key for one file
    ///
    /// Deterministic: identical arguments and the same captured date always
    /// produce the same key.
    pub fn resolve(&self, file: &Path) -> String {
        let filename = if self.filename.is_empty() {
            basename(file)
        } else {
            self.filename.clone()
        };

        format!("{}{}{}{filename}", self.folder, self.date, self.subfolder)
    }
}

/// Last path component, as a string
fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn request() -> UploadRequest {
        UploadRequest {
            source: PathBuf::from("/tmp/report.csv"),
            bucket: "uploads".to_string(),
            filename: None,
            date_prefix: false,
            folder: None,
            recursive: false,
            subfolder: true,
        }
    }

    fn date(year: i16, month: i8, day: i8) -> Date {
        Date::new(year, month, day).unwrap()
    }

    #[test]
    fn test_bare_filename() {
        let resolver = KeyResolver::with_date(&request(), date(2024, 3, 5)).unwrap();
        assert_eq!(resolver.resolve(Path::new("/tmp/report.csv")), "report.csv");
    }

    #[test]
    fn test_folder_and_date() {
        let req = UploadRequest {
            date_prefix: true,
            folder: Some("logs".to_string()),
            ..request()
        };
        let resolver = KeyResolver::with_date(&req, date(2024, 3, 5)).unwrap();
        assert_eq!(
            resolver.resolve(Path::new("/tmp/report.csv")),
            "logs/2024/03/05/report.csv"
        );
    }

    #[test]
    fn test_date_is_zero_padded() {
        let req = UploadRequest {
            date_prefix: true,
            ..request()
        };
        let resolver = KeyResolver::with_date(&req, date(2024, 1, 9)).unwrap();
        assert_eq!(
            resolver.resolve(Path::new("/tmp/a.txt")),
            "2024/01/09/a.txt"
        );
    }

    #[test]
    fn test_filename_override() {
        let req = UploadRequest {
            filename: Some("renamed.csv".to_string()),
            ..request()
        };
        let resolver = KeyResolver::with_date(&req, date(2024, 3, 5)).unwrap();
        assert_eq!(
            resolver.resolve(Path::new("/tmp/report.csv")),
            "renamed.csv"
        );
    }

    #[test]
    fn test_recursive_subfolder() {
        let req = UploadRequest {
            source: PathBuf::from("/data/batch"),
            recursive: true,
            ..request()
        };
        let resolver = KeyResolver::with_date(&req, date(2024, 3, 5)).unwrap();
        assert_eq!(resolver.resolve(Path::new("/data/batch/a.txt")), "batch/a.txt");
        assert_eq!(resolver.resolve(Path::new("/data/batch/b.txt")), "batch/b.txt");
    }

    #[test]
    fn test_recursive_no_subfolder() {
        let req = UploadRequest {
            source: PathBuf::from("/data/batch"),
            recursive: true,
            subfolder: false,
            ..request()
        };
        let resolver = KeyResolver::with_date(&req, date(2024, 3, 5)).unwrap();
        assert_eq!(resolver.resolve(Path::new("/data/batch/a.txt")), "a.txt");
    }

    #[test]
    fn test_all_segments() {
        let req = UploadRequest {
            source: PathBuf::from("/data/batch"),
            date_prefix: true,
            folder: Some("archive".to_string()),
            recursive: true,
            ..request()
        };
        let resolver = KeyResolver::with_date(&req, date(2024, 12, 31)).unwrap();
        assert_eq!(
            resolver.resolve(Path::new("/data/batch/a.txt")),
            "archive/2024/12/31/batch/a.txt"
        );
    }

    #[test]
    fn test_no_doubled_separators_when_segments_absent() {
        let resolver = KeyResolver::with_date(&request(), date(2024, 3, 5)).unwrap();
        let key = resolver.resolve(Path::new("/tmp/report.csv"));
        assert!(!key.contains("//"));
        assert!(!key.starts_with('/'));
    }

    #[test]
    fn test_empty_folder_contributes_nothing() {
        let req = UploadRequest {
            folder: Some(String::new()),
            ..request()
        };
        let resolver = KeyResolver::with_date(&req, date(2024, 3, 5)).unwrap();
        assert_eq!(resolver.resolve(Path::new("/tmp/report.csv")), "report.csv");
    }

    #[test]
    fn test_filename_with_recursive_is_rejected() {
        let req = UploadRequest {
            filename: Some("x".to_string()),
            recursive: true,
            ..request()
        };
        let result = KeyResolver::with_date(&req, date(2024, 3, 5));
        assert!(matches!(result, Err(Error::InvalidOptions(_))));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let req = UploadRequest {
            date_prefix: true,
            folder: Some("logs".to_string()),
            ..request()
        };
        let resolver = KeyResolver::with_date(&req, date(2024, 3, 5)).unwrap();
        let a = resolver.resolve(Path::new("/tmp/report.csv"));
        let b = resolver.resolve(Path::new("/tmp/report.csv"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_unsanitized_folder_passes_through() {
        // Documented permissive behavior: no normalization of dot segments
        // or embedded separators.
        let req = UploadRequest {
            folder: Some("../escape".to_string()),
            ..request()
        };
        let resolver = KeyResolver::with_date(&req, date(2024, 3, 5)).unwrap();
        assert_eq!(
            resolver.resolve(Path::new("/tmp/report.csv")),
            "../escape/report.csv"
        );
    }
}
