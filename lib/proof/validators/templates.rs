//! Detection of unmodified scaffolding copied from the bundled templates.

use crate::constants::{
    BOILERPLATE_MIN_LINE_LEN, ICON_FILE, TEMPLATE_ICON, TEMPLATE_README, TEMPLATE_README_NAME,
};
use crate::probe::Probe;
use sha2::{Digest, Sha256};

use super::super::result::ValidationResult;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A template line long enough to be treated as boilerplate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoilerplateLine {
    /// 1-based line number in the template.
    pub number: usize,

    /// Line text without surrounding whitespace.
    pub text: String,
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Compute the SHA-256 fingerprint of data as a hex string.
pub fn fingerprint(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Returns true if the candidate is byte-for-byte the template.
pub fn is_unmodified_template(template: &[u8], candidate: &[u8]) -> bool {
    fingerprint(template) == fingerprint(candidate)
}

/// Lines of the template at least `min_len` characters long, with their line numbers.
pub fn boilerplate_lines(template: &str, min_len: usize) -> Vec<BoilerplateLine> {
    template
        .lines()
        .enumerate()
        .filter(|(_, line)| line.chars().count() >= min_len)
        .map(|(i, line)| BoilerplateLine {
            number: i + 1,
            text: line.trim().to_string(),
        })
        .filter(|line| !line.text.is_empty())
        .collect()
}

/// Line numbers of the boilerplate lines contained verbatim in the content.
pub fn find_boilerplate(lines: &[BoilerplateLine], content: &str) -> Vec<usize> {
    lines
        .iter()
        .filter(|line| content.contains(&line.text))
        .map(|line| line.number)
        .collect()
}

/// Check `icon.svg` against the bundled icon template.
pub fn validate_icon(probe: &dyn Probe, result: &mut ValidationResult) {
    if !probe.exists(ICON_FILE) {
        result.warn("No icon.svg file.");
        return;
    }

    match probe.read_bytes(ICON_FILE) {
        Ok(icon) => {
            if is_unmodified_template(TEMPLATE_ICON, &icon) {
                result.err("Includes template icon.svg file.");
            }
        }
        Err(e) => result.err(format!("Error while opening {} ({})", ICON_FILE, e)),
    }
}

/// Check README files in the charm root for boilerplate from the bundled template.
pub fn validate_readmes(probe: &dyn Probe, result: &mut ValidationResult) {
    let readmes: Vec<String> = match probe.list_root() {
        Ok(names) => names
            .into_iter()
            .filter(|name| name.to_uppercase().contains("README"))
            .collect(),
        Err(e) => {
            result.err(format!("Error while listing charm directory ({})", e));
            return;
        }
    };

    if readmes.is_empty() {
        result.warn("no README file");
        return;
    }

    let lines = boilerplate_lines(TEMPLATE_README, BOILERPLATE_MIN_LINE_LEN);
    for readme in &readmes {
        if readme == TEMPLATE_README_NAME {
            result.err("Includes template README.ex file");
        }

        match probe.read_bytes(readme) {
            Ok(bytes) => {
                let content = String::from_utf8_lossy(&bytes);
                for number in find_boilerplate(&lines, &content) {
                    result.err(format!(
                        "{} Includes boilerplate README.ex line {}",
                        readme, number
                    ));
                }
            }
            Err(e) => result.err(format!("Error while opening {} ({})", readme, e)),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::MemoryProbe;
    use crate::proof::result::Severity;

    const TEMPLATE: &str = "# Title\n\
        \n\
        This line is deliberately long enough to count as boilerplate text.\n\
        short line\n\
        \x20   Another sufficiently long line that authors rarely rewrite at all.   \n";

    #[test]
    fn test_boilerplate_lines_use_template_line_numbers() {
        let lines = boilerplate_lines(TEMPLATE, 40);
        let numbers: Vec<_> = lines.iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![3, 5]);
        assert_eq!(
            lines[1].text,
            "Another sufficiently long line that authors rarely rewrite at all."
        );
    }

    #[test]
    fn test_find_boilerplate_is_substring_match() {
        let lines = boilerplate_lines(TEMPLATE, 40);
        let content = "intro\nprefix This line is deliberately long enough to count as \
                       boilerplate text. suffix\n";
        assert_eq!(find_boilerplate(&lines, content), vec![3]);
        assert!(find_boilerplate(&lines, "short line\n").is_empty());
    }

    #[test]
    fn test_fingerprint() {
        assert_eq!(
            fingerprint(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert!(is_unmodified_template(b"same", b"same"));
        assert!(!is_unmodified_template(b"same", b"same "));
    }

    #[test]
    fn test_template_icon() {
        let probe = MemoryProbe::new().with_file(ICON_FILE, TEMPLATE_ICON);
        let mut result = ValidationResult::default();
        validate_icon(&probe, &mut result);
        assert_eq!(result.diagnostics[0].message, "Includes template icon.svg file.");
        assert_eq!(result.diagnostics[0].severity, Severity::Err);

        let probe = MemoryProbe::new().with_file(ICON_FILE, "<svg/>");
        let mut result = ValidationResult::default();
        validate_icon(&probe, &mut result);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_icon() {
        let mut result = ValidationResult::default();
        validate_icon(&MemoryProbe::new(), &mut result);
        assert_eq!(result.diagnostics[0].severity, Severity::Warn);
    }

    #[test]
    fn test_missing_readme() {
        let mut result = ValidationResult::default();
        validate_readmes(&MemoryProbe::new().with_file("copyright", ""), &mut result);
        assert_eq!(result.diagnostics[0].message, "no README file");
    }

    #[test]
    fn test_readme_with_boilerplate() {
        let first = boilerplate_lines(TEMPLATE_README, BOILERPLATE_MIN_LINE_LEN)
            .into_iter()
            .next()
            .unwrap();
        let content = format!("# My charm\n\n{}\n", first.text);
        let probe = MemoryProbe::new().with_file("README.md", content);

        let mut result = ValidationResult::default();
        validate_readmes(&probe, &mut result);
        assert_eq!(
            result.diagnostics[0].message,
            format!("README.md Includes boilerplate README.ex line {}", first.number)
        );
        assert_eq!(result.count(Severity::Err), 1);
    }

    #[test]
    fn test_template_readme_name() {
        let probe = MemoryProbe::new()
            .with_file("README.ex", "Custom text.\n")
            .with_file("readme.txt", "Custom text.\n");
        let mut result = ValidationResult::default();
        validate_readmes(&probe, &mut result);
        let messages: Vec<_> = result.diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["Includes template README.ex file"]);
    }

    #[test]
    fn test_template_readme_name_is_still_scanned() {
        let probe = MemoryProbe::new().with_file("README.ex", TEMPLATE_README);
        let mut result = ValidationResult::default();
        validate_readmes(&probe, &mut result);

        let lines = boilerplate_lines(TEMPLATE_README, BOILERPLATE_MIN_LINE_LEN);
        let mut expected = vec!["Includes template README.ex file".to_string()];
        expected.extend(
            lines
                .iter()
                .map(|l| format!("README.ex Includes boilerplate README.ex line {}", l.number)),
        );
        let messages: Vec<_> = result.diagnostics.iter().map(|d| d.message.clone()).collect();
        assert_eq!(messages, expected);
    }

    #[test]
    fn test_readme_with_invalid_utf8_is_scanned() {
        let first = boilerplate_lines(TEMPLATE_README, BOILERPLATE_MIN_LINE_LEN)
            .into_iter()
            .next()
            .unwrap();
        let mut content = b"# Caf\xe9 charm\n\n".to_vec();
        content.extend_from_slice(first.text.as_bytes());
        let probe = MemoryProbe::new().with_file("README", content);

        let mut result = ValidationResult::default();
        validate_readmes(&probe, &mut result);
        let messages: Vec<_> = result.diagnostics.iter().map(|d| d.message.clone()).collect();
        assert_eq!(
            messages,
            vec![format!("README Includes boilerplate README.ex line {}", first.number)]
        );
    }

    #[test]
    fn test_unreadable_icon() {
        let probe = MemoryProbe::new().with_dir(ICON_FILE);
        let mut result = ValidationResult::default();
        validate_icon(&probe, &mut result);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].severity, Severity::Err);
        assert_eq!(
            result.diagnostics[0].message,
            "Error while opening icon.svg (Is a directory)"
        );
    }

    #[test]
    fn test_unreadable_readme() {
        let probe = MemoryProbe::new().with_dir("README");
        let mut result = ValidationResult::default();
        validate_readmes(&probe, &mut result);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].severity, Severity::Err);
        assert_eq!(
            result.diagnostics[0].message,
            "Error while opening README (Is a directory)"
        );
    }

    struct UnlistableProbe;

    impl Probe for UnlistableProbe {
        fn exists(&self, _relative: &str) -> bool {
            false
        }

        fn is_dir(&self, _relative: &str) -> bool {
            false
        }

        fn is_executable(&self, _relative: &str) -> bool {
            false
        }

        fn read_bytes(&self, _relative: &str) -> std::io::Result<Vec<u8>> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
        }

        fn list_root(&self) -> std::io::Result<Vec<String>> {
            Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "Permission denied",
            ))
        }
    }

    #[test]
    fn test_unlistable_charm_root() {
        let mut result = ValidationResult::default();
        validate_readmes(&UnlistableProbe, &mut result);
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].severity, Severity::Err);
        assert_eq!(
            result.diagnostics[0].message,
            "Error while listing charm directory (Permission denied)"
        );
    }
}
