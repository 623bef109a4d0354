use git_hash::ObjectId;

use crate::{LooseError, LooseObjectStore};

/// Iterator over loose object OIDs, sourced from the store's storage backend.
pub struct LooseObjectIter {
    oids: std::vec::IntoIter<ObjectId>,
}

impl Iterator for LooseObjectIter {
    type Item = Result<ObjectId, LooseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.oids.next().map(Ok)
    }
}

impl LooseObjectStore {
    /// Iterate over all loose object OIDs.
    pub fn iter(&self) -> Result<LooseObjectIter, LooseError> {
        let oids = self.backend.list_loose_objects()?;
        Ok(LooseObjectIter {
            oids: oids.into_iter(),
        })
    }
}
