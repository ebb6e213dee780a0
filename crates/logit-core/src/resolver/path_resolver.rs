//! Log file path resolution

use super::framework::FrameworkContext;

const LOG_SUFFIX: &str = ".log";

/// Computes the file path for a named log
///
/// - A name containing a path separator is used as given.
/// - A bare name under a host framework becomes `<root>/log/<name>_<env>.log`.
/// - Otherwise the bare name is relative to the working directory.
///
/// In every case `.log` is appended when the result does not already end
/// with it. Resolution is pure given the name and the framework context.
#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    framework: FrameworkContext,
}

impl PathResolver {
    pub fn new(framework: FrameworkContext) -> Self {
        Self { framework }
    }

    pub fn framework(&self) -> &FrameworkContext {
        &self.framework
    }

    pub fn resolve(&self, name: &str) -> String {
        let name = name.trim();

        let mut path = match &self.framework {
            FrameworkContext::Present { root, environment } if !is_qualified(name) => {
                let stem = name.strip_suffix(LOG_SUFFIX).unwrap_or(name);
                let root = root.trim_end_matches(std::path::is_separator);
                format!("{}/log/{}_{}", root, stem, environment)
            }
            _ => name.to_string(),
        };

        if !path.ends_with(LOG_SUFFIX) {
            path.push_str(LOG_SUFFIX);
        }
        path
    }
}

fn is_qualified(name: &str) -> bool {
    name.chars().any(std::path::is_separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare() -> PathResolver {
        PathResolver::new(FrameworkContext::Absent)
    }

    fn framed() -> PathResolver {
        PathResolver::new(FrameworkContext::present("/srv/app", "production"))
    }

    #[test]
    fn test_bare_name_without_framework() {
        assert_eq!(bare().resolve("publisher"), "publisher.log");
        assert_eq!(bare().resolve("publisher.log"), "publisher.log");
        assert_eq!(bare().resolve("  publisher \n"), "publisher.log");
    }

    #[test]
    fn test_qualified_name_ignores_framework() {
        for resolver in [bare(), framed()] {
            assert_eq!(resolver.resolve("/tmp/publisher"), "/tmp/publisher.log");
            assert_eq!(resolver.resolve("/tmp/publisher.log"), "/tmp/publisher.log");
            assert_eq!(resolver.resolve("logs/app.txt"), "logs/app.txt.log");
        }
    }

    #[test]
    fn test_bare_name_with_framework() {
        assert_eq!(framed().resolve("publisher"), "/srv/app/log/publisher_production.log");
        assert_eq!(framed().resolve("publisher.log"), "/srv/app/log/publisher_production.log");
    }

    #[test]
    fn test_trailing_separator_on_root() {
        let resolver = PathResolver::new(FrameworkContext::present("/srv/app/", "production"));
        assert_eq!(resolver.resolve("publisher"), "/srv/app/log/publisher_production.log");

        let resolver = PathResolver::new(FrameworkContext::present("/", "test"));
        assert_eq!(resolver.resolve("jobs"), "/log/jobs_test.log");
    }

    #[test]
    fn test_deterministic() {
        let resolver = framed();
        assert_eq!(resolver.resolve("jobs"), resolver.resolve("jobs"));
    }
}
