use std::fmt::{self, Write as _};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
    pub severity: Severity,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Ordered list of issues; order follows the traversal that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.add_with_severity(path, message, Severity::Error);
    }

    pub fn add_with_severity(
        &mut self,
        path: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
    ) {
        self.issues.push(ValidationIssue {
            path: path.into(),
            message: message.into(),
            severity,
        });
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.issues.extend(other.issues);
    }

    /// Valid when no issue has error severity.
    pub fn is_valid(&self) -> bool {
        !self
            .issues
            .iter()
            .any(|issue| issue.severity == Severity::Error)
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }

    /// `Validation failed:` and one ` - ` line per issue, without a trailing
    /// newline. Issues past `cap` fold into a single `... and N more` line.
    pub fn summary(&self, cap: Option<usize>) -> String {
        let shown = cap.unwrap_or(usize::MAX);
        let mut out = String::from("Validation failed:");
        for issue in self.issues.iter().take(shown) {
            write!(&mut out, "\n - {issue}").expect("writing to String cannot fail");
        }
        if self.issues.len() > shown {
            write!(&mut out, "\n - ... and {} more", self.issues.len() - shown)
                .expect("writing to String cannot fail");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{Severity, ValidationReport};

    #[test]
    fn issues_render_as_path_colon_message() {
        let mut report = ValidationReport::new();
        report.add("$quests[0].id", "invalid id 'Bad Id'");
        assert_eq!(report.messages(), vec!["$quests[0].id: invalid id 'Bad Id'"]);
        assert!(!report.is_valid());
    }

    #[test]
    fn warnings_alone_keep_a_report_valid() {
        let mut report = ValidationReport::new();
        report.add_with_severity("$items", "unused item", Severity::Warning);
        assert!(report.is_valid());
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn summary_folds_issues_past_the_cap() {
        let mut report = ValidationReport::new();
        for i in 0..4 {
            report.add(format!("$quests.quests[{i}].id"), "invalid id format");
        }

        let full = report.summary(None);
        assert_eq!(full.lines().count(), 5);
        assert!(full.starts_with("Validation failed:\n - $quests.quests[0].id: invalid id format\n"));
        assert!(!full.ends_with('\n'));

        let capped = report.summary(Some(2));
        let lines: Vec<&str> = capped.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], " - ... and 2 more");
        assert_eq!(report.summary(Some(4)).lines().count(), 5);
    }

    #[test]
    fn merge_appends_in_order() {
        let mut first = ValidationReport::new();
        first.add("a", "one");
        let mut second = ValidationReport::new();
        second.add("b", "two");
        second.add("c", "three");
        first.merge(second);
        let paths: Vec<&str> = first.issues().iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["a", "b", "c"]);
    }
}
