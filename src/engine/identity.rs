// ==========================================
// Inventory Planning Engine - Identity Resolution
// ==========================================
// Responsibility: turn string-keyed facts into typed item handles.
// Built once per pass; the dual-key fallback is an explicit,
// independently testable operation instead of an inline lookup chain.
// ==========================================

use crate::domain::{normalize_key, MaterialIdentity, QtyVal};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// ItemHandle - typed index into the material arena
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemHandle(pub u32);

impl ItemHandle {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ==========================================
// ItemIndex - material arena + key maps
// ==========================================
// Description keys win over part-number keys on collision;
// the first material wins on duplicate keys.
#[derive(Debug, Clone)]
pub struct ItemIndex {
    materials: Vec<MaterialIdentity>,
    by_description: HashMap<String, ItemHandle>,
    by_part_no: HashMap<String, ItemHandle>,
}

impl ItemIndex {
    /// Build the index from the snapshot's material master.
    pub fn build(materials: &[MaterialIdentity]) -> Self {
        let mut by_description = HashMap::with_capacity(materials.len());
        let mut by_part_no = HashMap::with_capacity(materials.len());

        for (i, mat) in materials.iter().enumerate() {
            let handle = ItemHandle(i as u32);
            let desc = mat.description_key();
            if !desc.is_empty() {
                by_description.entry(desc).or_insert(handle);
            }
            let part = mat.part_no_key();
            if !part.is_empty() {
                by_part_no.entry(part).or_insert(handle);
            }
        }

        Self {
            materials: materials.to_vec(),
            by_description,
            by_part_no,
        }
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn get(&self, handle: ItemHandle) -> &MaterialIdentity {
        &self.materials[handle.index()]
    }

    /// Iterate materials in snapshot order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemHandle, &MaterialIdentity)> {
        self.materials
            .iter()
            .enumerate()
            .map(|(i, m)| (ItemHandle(i as u32), m))
    }

    /// Resolve a raw fact key to a handle: description map first,
    /// then part-number map.
    pub fn resolve(&self, raw_key: &str) -> Option<ItemHandle> {
        let key = normalize_key(raw_key);
        if key.is_empty() {
            return None;
        }
        self.by_description
            .get(&key)
            .or_else(|| self.by_part_no.get(&key))
            .copied()
    }

    /// The lookup keys of one material: its description key, plus the
    /// part-number key when that is non-empty and different.
    pub fn lookup_keys(&self, handle: ItemHandle) -> (String, Option<String>) {
        let mat = self.get(handle);
        let desc = mat.description_key();
        let part = mat.part_no_key();
        if !part.is_empty() && part != desc {
            (desc, Some(part))
        } else {
            (desc, None)
        }
    }
}

// ==========================================
// Dual-key sales matching
// ==========================================

/// Combined sales total for a material.
///
/// # Rules
/// 1. part key present (non-empty, differs from description key)
///    -> sum of both keys' totals
/// 2. otherwise the description-keyed total, falling back to the
///    part-number-keyed total only when the description total has
///    zero quantity
pub fn dual_key_total(
    desc_key: &str,
    part_key: Option<&str>,
    map: &HashMap<String, QtyVal>,
) -> QtyVal {
    match part_key {
        Some(part) => {
            let mut total = map.get(desc_key).copied().unwrap_or_default();
            if let Some(extra) = map.get(part) {
                total.merge(*extra);
            }
            total
        }
        None => map.get(desc_key).copied().unwrap_or_default(),
    }
}

/// Transaction-list analogue of [`dual_key_total`]: the fallback test
/// becomes "no transactions under the description key".
pub fn dual_key_rows(
    desc_key: &str,
    part_key: Option<&str>,
    map: &HashMap<String, Vec<usize>>,
) -> Vec<usize> {
    match part_key {
        Some(part) => {
            let mut rows = map.get(desc_key).cloned().unwrap_or_default();
            if let Some(extra) = map.get(part) {
                rows.extend_from_slice(extra);
            }
            rows
        }
        None => map.get(desc_key).cloned().unwrap_or_default(),
    }
}
