#[cfg(test)]
pub mod test {
    use std::fs;
    use std::path::{Path, PathBuf};

    /// A config file as a desktop uploader leaves it after a few sessions.
    pub const SAMPLE: &str = "\
username = someone@example.com
key = 0A1B2C3D4E5F
historysize = 5
usage = 123456789012
openbrowser = 0
notificationsound = 1
lastupdate = 2024-01-02 03:04
servers = https%3A%2F%2Fpuush.me%2F,,https%3A%2F%2Fmirror.example%2Fapi
hotkeys = 1,2,3
";

    pub const FILE_NAME: &str = "puush.cfg";

    /// Write [`SAMPLE`] into `dir` and return its path.
    pub fn write_sample(dir: &Path) -> PathBuf {
        let path = dir.join(FILE_NAME);
        fs::write(&path, SAMPLE).unwrap();
        path
    }

    #[test]
    fn sample_parses_without_malformed_lines() {
        let doc = crate::file::parse_document(SAMPLE);
        assert_eq!(doc.entries.len(), 9);
        assert!(doc.malformed.is_empty());
    }
}
