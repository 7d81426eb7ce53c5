/// Case-insensitive substring search
/// over completed task text.
#[derive(
  Debug, Clone, Default, PartialEq, Eq,
)]
pub struct SearchFilter {
  needle: String
}

impl SearchFilter {
  pub fn parse(query: &str) -> Self {
    Self {
      needle: query.to_lowercase()
    }
  }

  pub fn is_empty(&self) -> bool {
    self.needle.is_empty()
  }

  pub fn matches(
    &self,
    text: &str
  ) -> bool {
    self.is_empty()
      || text
        .to_lowercase()
        .contains(&self.needle)
  }
}
