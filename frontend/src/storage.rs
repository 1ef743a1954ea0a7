/// String key-value store that outlives the page, i.e. `localStorage`.
/// A missing or unusable store behaves like an empty one.
#[cfg_attr(test, mockall::automock)]
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}
