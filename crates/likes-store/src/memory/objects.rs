use likes_core::{ContentKind, Lookup, ObjectRef};

use super::MemoryStore;
use crate::error::{StoreError, StoreResult};
use crate::traits::{CommentStore, ObjectResolver, StoredObject};

impl ObjectResolver for MemoryStore {
    fn resolve(&self, kind: ContentKind, lookup: &Lookup) -> StoreResult<Option<StoredObject>> {
        match lookup {
            Lookup::Id(id) => self.get(ObjectRef { kind, id: *id }),
            Lookup::Slug { field, value } => {
                let mut matches: Vec<StoredObject> = self
                    .objects
                    .iter()
                    .filter(|e| {
                        e.key().kind == kind
                            && e.value().fields.get(field).map(String::as_str) == Some(value.as_str())
                    })
                    .map(|e| e.value().clone())
                    .collect();
                if matches.len() > 1 {
                    return Err(StoreError::Ambiguous {
                        kind,
                        lookup: lookup.clone(),
                    });
                }
                Ok(matches.pop())
            }
        }
    }

    fn get(&self, object: ObjectRef) -> StoreResult<Option<StoredObject>> {
        Ok(self.objects.get(&object).map(|e| e.value().clone()))
    }
}

impl CommentStore for MemoryStore {
    fn commented_object(&self, comment: ObjectRef) -> StoreResult<Option<ObjectRef>> {
        Ok(self.parents.get(&comment).map(|e| *e.value()))
    }
}
