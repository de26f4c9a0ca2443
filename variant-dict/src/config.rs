/// Default locations of the two mapping tables.
#[derive(Debug, Clone, Copy)]
pub struct DictionaryDefaults {
    /// Simplified -> traditional variants.
    pub forward_url: &'static str,
    /// Traditional -> simplified.
    pub reverse_url: &'static str,
}

pub const DICTIONARY_DEFAULTS: DictionaryDefaults = DictionaryDefaults {
    forward_url: "https://raw.githubusercontent.com/BYVoid/OpenCC/master/data/dictionary/STCharacters.txt",
    reverse_url: "https://raw.githubusercontent.com/BYVoid/OpenCC/master/data/dictionary/TSCharacters.txt",
};

/// What to do when a key repeats with a different value inside one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Later lines replace earlier ones (logged and counted).
    #[default]
    LastWins,
    /// Fail the load with a format error.
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryConfig {
    pub forward_url: String,
    pub reverse_url: String,
    /// Keep forward entries with a single variant as well.
    pub keep_single_variant: bool,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for DictionaryConfig {
    fn default() -> Self { default_dictionary_config() }
}

pub fn default_dictionary_config() -> DictionaryConfig {
    DictionaryConfig {
        forward_url: DICTIONARY_DEFAULTS.forward_url.into(),
        reverse_url: DICTIONARY_DEFAULTS.reverse_url.into(),
        keep_single_variant: false,
        duplicate_policy: DuplicatePolicy::LastWins,
    }
}
