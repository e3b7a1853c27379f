use crate::error::HeaderError;
use crate::tally::Tally;
use crate::types::{Consensus, SourceFile};

impl Consensus {
    /// Pick the majority copyright and license among `files`.
    ///
    /// Files lacking a field do not vote for it.
    pub fn from_files(files: &[SourceFile]) -> Result<Self, HeaderError> {
        let copyrights: Tally = files.iter().map(|f| f.copyright.as_str()).collect();
        let licenses: Tally = files.iter().map(|f| f.license.as_str()).collect();

        let copyright = copyrights.majority().ok_or(HeaderError::NoCopyright)?;
        let license = licenses.majority().ok_or(HeaderError::NoLicense)?;

        tracing::debug!(
            copyright,
            votes = copyrights.count(copyright),
            voters = copyrights.total(),
            distinct = copyrights.len(),
            "copyright majority"
        );
        tracing::debug!(
            license,
            votes = licenses.count(license),
            voters = licenses.total(),
            distinct = licenses.len(),
            "license majority"
        );

        Ok(Self {
            copyright: copyright.to_string(),
            license: license.to_string(),
        })
    }
}
