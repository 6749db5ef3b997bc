use std::env;
use std::path::PathBuf;

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_PAIRS_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub pairs_limit: usize,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup("FPL_DATA_DIR")
            .filter(|val| !val.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let pairs_limit = lookup("PAIRS_LIMIT")
            .and_then(|val| val.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_PAIRS_LIMIT)
            .max(1);
        Self {
            data_dir,
            pairs_limit,
        }
    }
}

/// Load `.env.local` then `.env`; variables already set win.
pub fn load_dotenv() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::Settings;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let s = settings(&[]);
        assert_eq!(s.data_dir, PathBuf::from("data"));
        assert_eq!(s.pairs_limit, 10);
    }

    #[test]
    fn blank_data_dir_falls_back() {
        assert_eq!(settings(&[("FPL_DATA_DIR", "  ")]).data_dir, PathBuf::from("data"));
        assert_eq!(
            settings(&[("FPL_DATA_DIR", "/srv/fpl")]).data_dir,
            PathBuf::from("/srv/fpl")
        );
    }

    #[test]
    fn pairs_limit_is_at_least_one() {
        assert_eq!(settings(&[("PAIRS_LIMIT", "0")]).pairs_limit, 1);
        assert_eq!(settings(&[("PAIRS_LIMIT", " 25 ")]).pairs_limit, 25);
        assert_eq!(settings(&[("PAIRS_LIMIT", "lots")]).pairs_limit, 10);
    }
}
