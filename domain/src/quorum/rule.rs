//! Agreement rules for worker voting
//!
//! A rule decides whether the leading answer has enough supporting workers
//! to be accepted without consulting the judge.

/// Rule for accepting the leading worker answer
///
/// - `Majority`: more than half of the workers agree (default)
/// - `Unanimous`: every worker agrees
/// - `AtLeast(n)`: at least n workers agree
/// - `Percentage(p)`: at least p% of workers agree
///
/// # Example
///
/// ```
/// use quizquorum_domain::quorum::QuorumRule;
///
/// let rule = QuorumRule::Majority;
/// assert!(rule.is_satisfied(2, 3));
/// assert!(!rule.is_satisfied(1, 3));
///
/// let strict = QuorumRule::Unanimous;
/// assert!(strict.is_satisfied(3, 3));
/// assert!(!strict.is_satisfied(2, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuorumRule {
    #[default]
    Majority,

    Unanimous,

    AtLeast(usize),

    /// 0-100
    Percentage(u8),
}

impl QuorumRule {
    /// Check the rule against the number of supporting workers out of `total`
    pub fn is_satisfied(&self, supporters: usize, total: usize) -> bool {
        if total == 0 {
            return false;
        }
        supporters >= self.min_supporters(total)
    }

    /// Minimum supporting workers needed out of `total`
    pub fn min_supporters(&self, total: usize) -> usize {
        match self {
            QuorumRule::Majority => total / 2 + 1,
            QuorumRule::Unanimous => total,
            QuorumRule::AtLeast(n) => *n,
            QuorumRule::Percentage(p) => (total as f64 * (*p as f64 / 100.0)).ceil() as usize,
        }
    }

    /// Config string form, parseable by [`FromStr`](std::str::FromStr)
    pub fn as_config_str(&self) -> String {
        match self {
            QuorumRule::Majority => "majority".to_string(),
            QuorumRule::Unanimous => "unanimous".to_string(),
            QuorumRule::AtLeast(n) => format!("atleast:{}", n),
            QuorumRule::Percentage(p) => format!("{}%", p),
        }
    }

    pub fn description(&self) -> String {
        match self {
            QuorumRule::Majority => "majority (more than half agree)".to_string(),
            QuorumRule::Unanimous => "unanimous (all workers agree)".to_string(),
            QuorumRule::AtLeast(n) => format!("at least {} workers agree", n),
            QuorumRule::Percentage(p) => format!("at least {}% of workers agree", p),
        }
    }
}

impl std::fmt::Display for QuorumRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::str::FromStr for QuorumRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "majority" => Ok(QuorumRule::Majority),
            "unanimous" => Ok(QuorumRule::Unanimous),
            s if s.starts_with("atleast:") || s.starts_with("at_least:") => {
                let n: usize = s
                    .split(':')
                    .nth(1)
                    .ok_or("Missing number after atleast:")?
                    .trim()
                    .parse()
                    .map_err(|_| "Invalid number for atleast")?;
                Ok(QuorumRule::AtLeast(n))
            }
            s if s.starts_with("percentage:") || s.ends_with('%') => {
                let num_str = s.trim_start_matches("percentage:").trim_end_matches('%');
                let p: u8 = num_str.trim().parse().map_err(|_| "Invalid percentage")?;
                if p > 100 {
                    return Err(format!("Percentage out of range: {}", p));
                }
                Ok(QuorumRule::Percentage(p))
            }
            _ => Err(format!(
                "Unknown agreement rule: {}. Valid: majority, unanimous, atleast:N, percentage:N or N%",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_majority_rule() {
        let rule = QuorumRule::Majority;

        assert!(!rule.is_satisfied(1, 3));
        assert!(rule.is_satisfied(2, 3));
        assert!(rule.is_satisfied(3, 3));

        assert!(!rule.is_satisfied(2, 4));
        assert!(rule.is_satisfied(3, 4));
    }

    #[test]
    fn test_unanimous_rule() {
        let rule = QuorumRule::Unanimous;

        assert!(!rule.is_satisfied(2, 3));
        assert!(rule.is_satisfied(3, 3));
    }

    #[test]
    fn test_at_least_and_percentage() {
        assert!(!QuorumRule::AtLeast(3).is_satisfied(2, 5));
        assert!(QuorumRule::AtLeast(3).is_satisfied(3, 5));

        // 5 workers at 75% needs ceil(3.75) = 4
        assert!(!QuorumRule::Percentage(75).is_satisfied(3, 5));
        assert!(QuorumRule::Percentage(75).is_satisfied(4, 5));
    }

    #[test]
    fn test_zero_total() {
        assert!(!QuorumRule::Majority.is_satisfied(0, 0));
        assert!(!QuorumRule::AtLeast(0).is_satisfied(0, 0));
    }

    #[test]
    fn test_parse_rule() {
        assert_eq!("Majority".parse::<QuorumRule>(), Ok(QuorumRule::Majority));
        assert_eq!("unanimous".parse::<QuorumRule>(), Ok(QuorumRule::Unanimous));
        assert_eq!("atleast:2".parse::<QuorumRule>(), Ok(QuorumRule::AtLeast(2)));
        assert_eq!("at_least:3".parse::<QuorumRule>(), Ok(QuorumRule::AtLeast(3)));
        assert_eq!("80%".parse::<QuorumRule>(), Ok(QuorumRule::Percentage(80)));
        assert!("150%".parse::<QuorumRule>().is_err());
        assert!("most".parse::<QuorumRule>().is_err());
    }

    #[test]
    fn test_config_str_roundtrip() {
        for rule in [
            QuorumRule::Majority,
            QuorumRule::Unanimous,
            QuorumRule::AtLeast(2),
            QuorumRule::Percentage(60),
        ] {
            assert_eq!(rule.as_config_str().parse::<QuorumRule>(), Ok(rule));
        }
    }
}
