use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator as _, IntoStaticStr};

/// Translation domain. Each one gets its own subfolder under every locale.
#[derive(
    AsRefStr, Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, IntoStaticStr, PartialEq,
)]
pub enum Category {
    /// UI and generic strings.
    #[strum(serialize = "genericTrans")]
    Generic,
    /// Game master data.
    #[strum(serialize = "masterTrans")]
    Master,
}

impl Category {
    /// Name of the per-locale subfolder.
    pub fn dir_name(self) -> &'static str {
        self.into()
    }

    pub fn all() -> impl Iterator<Item = Category> {
        Category::iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr as _;

    #[test]
    fn test_dir_names() {
        assert_eq!(Category::Generic.dir_name(), "genericTrans");
        assert_eq!(Category::Master.dir_name(), "masterTrans");
    }

    #[test]
    fn test_dir_names_match_display() {
        for category in Category::all() {
            assert_eq!(category.to_string(), category.dir_name());
            assert_eq!(category.as_ref(), category.dir_name());
        }
    }

    #[test]
    fn test_parse_from_dir_name() {
        assert_eq!(Category::from_str("masterTrans").unwrap(), Category::Master);
        assert!(Category::from_str("other").is_err());
    }
}
