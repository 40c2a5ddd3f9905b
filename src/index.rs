//! The documentation index: owns every parsed record, groups them per kind
//! and namespace, and maintains the global cross-reference anchor table.
//!
//! Built once per run, populated incrementally as blocks are parsed, then
//! read exhaustively by the renderer. Registration order is observable:
//! anchor-table entries are last-write-wins and namespace listings keep
//! first-seen order.

use std::collections::HashMap;

use crate::model::{namespace_anchor, Detail, DocKind, DocRecord, KIND_COUNT};

/// Handle into the index's record arena.
pub type RecordId = usize;

/// Per-kind grouping state.
#[derive(Default)]
pub struct DocGroup {
    /// Every record of this kind, in registration order.
    pub records: Vec<RecordId>,
    /// Namespace name to member records, in registration order.
    pub by_namespace: HashMap<String, Vec<RecordId>>,
    /// Namespace names in first-seen order. The renderer sorts a copy for
    /// the kinds that order alphabetically.
    pub namespace_names: Vec<String>,
}

impl DocGroup {
    fn add_namespace_member(&mut self, name: &str, id: RecordId) {
        if !self.by_namespace.contains_key(name) {
            self.namespace_names.push(name.to_string());
        }
        self.by_namespace
            .entry(name.to_string())
            .or_default()
            .push(id);
    }
}

/// A namespace and its members per kind. Enum-prefix groupings (synthetic
/// namespaces derived from shared `PREFIX_*` names) are flagged so the
/// renderer can tell them apart from real namespaces.
pub struct NamespaceInfo {
    pub name: String,
    pub is_enum_namespace: bool,
    pub members: [Vec<RecordId>; KIND_COUNT],
}

impl NamespaceInfo {
    fn new(name: &str) -> Self {
        NamespaceInfo {
            name: name.to_string(),
            is_enum_namespace: false,
            members: std::array::from_fn(|_| Vec::new()),
        }
    }
}

pub struct DocIndex {
    records: Vec<DocRecord>,
    pub groups: [DocGroup; KIND_COUNT],
    pub namespaces: HashMap<String, NamespaceInfo>,
    /// Qualified title to anchor id, for `<linkto ref="…">` resolution.
    pub anchors: HashMap<String, String>,
}

impl DocIndex {
    pub fn new() -> Self {
        DocIndex {
            records: Vec::new(),
            groups: std::array::from_fn(|_| DocGroup::default()),
            namespaces: HashMap::new(),
            anchors: HashMap::new(),
        }
    }

    pub fn record(&self, id: RecordId) -> &DocRecord {
        &self.records[id]
    }

    pub fn group(&self, kind: DocKind) -> &DocGroup {
        &self.groups[kind.index()]
    }

    /// Register a parsed record.
    ///
    /// Inserts the record into its kind's list, stores its anchor under the
    /// qualified title (overwriting any earlier entry, with a warning), and
    /// files it under its namespace. Enums without a namespace group under
    /// their derived prefix instead. Fields are additionally cross-listed
    /// into the Function kind's namespace grouping so a namespace's field
    /// summary appears alongside its function summary.
    pub fn register(&mut self, record: DocRecord) {
        let qualified = record.qualified_title();
        let anchor = record.anchor();
        if let Some(previous) = self.anchors.insert(qualified.clone(), anchor.clone()) {
            if previous != anchor {
                eprintln!("warning: duplicate reference entry for `{}`", qualified);
            }
        }

        let kind = record.kind;
        let namespace = record.namespace.clone();
        let prefix = match &record.detail {
            Detail::Enum { prefix } => prefix.clone(),
            _ => None,
        };

        let id = self.records.len();
        self.records.push(record);
        self.groups[kind.index()].records.push(id);

        if let Some(ns) = namespace.as_deref() {
            self.groups[kind.index()].add_namespace_member(ns, id);
            self.namespace_entry(ns).members[kind.index()].push(id);
        } else if kind == DocKind::Enum {
            if let Some(prefix) = prefix {
                self.groups[kind.index()].add_namespace_member(&prefix, id);
                self.enum_namespace_entry(&prefix).members[kind.index()].push(id);
            }
        }

        if kind.is_field() {
            if let Some(ns) = namespace.as_deref() {
                self.groups[DocKind::Function.index()].add_namespace_member(ns, id);
            }
        }
    }

    /// Look up or create a namespace. Creation also claims the namespace's
    /// own anchor-table entry so `ref="<Namespace>"` links resolve.
    fn namespace_entry(&mut self, name: &str) -> &mut NamespaceInfo {
        if !self.namespaces.contains_key(name) {
            self.anchors
                .insert(name.to_string(), namespace_anchor(name));
        }
        self.namespaces
            .entry(name.to_string())
            .or_insert_with(|| NamespaceInfo::new(name))
    }

    /// Like `namespace_entry`, but a newly created entry is flagged as an
    /// enum-prefix grouping. An existing entry keeps its flag.
    fn enum_namespace_entry(&mut self, name: &str) -> &mut NamespaceInfo {
        let created = !self.namespaces.contains_key(name);
        let info = self.namespace_entry(name);
        if created {
            info.is_enum_namespace = true;
        }
        info
    }
}
