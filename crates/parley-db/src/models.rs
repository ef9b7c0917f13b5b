//! Write-side inputs. Stored records themselves live in `parley-types`.

/// A message before the store assigns its id and timestamp.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub sent_by_id: String,
    pub text: String,
    pub conversation_id: String,
}
