use crate::document::Document;
use crate::error::Result;
use std::path::Path;

/// Encode documents as a pretty-printed JSON array
pub fn encode_json(docs: &[Document]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(docs)?)
}

pub fn save_json(path: impl AsRef<Path>, docs: &[Document]) -> Result<()> {
    super::write_file(path.as_ref(), &encode_json(docs)?)
}
