//! Data model for parsed documentation records.

/// Category of a documented API element. `ALL` is the fixed enumeration
/// order every rendering pass walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocKind {
    Function,
    Method,
    Constructor,
    Field,
    ClassField,
    Enum,
    Constant,
    GlobalVar,
}

pub const KIND_COUNT: usize = 8;

impl DocKind {
    pub const ALL: [DocKind; KIND_COUNT] = [
        DocKind::Function,
        DocKind::Method,
        DocKind::Constructor,
        DocKind::Field,
        DocKind::ClassField,
        DocKind::Enum,
        DocKind::Constant,
        DocKind::GlobalVar,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Plural slug used in anchor ids. Byte-exact compatibility matters:
    /// existing external links are built from these.
    pub fn slug(self) -> &'static str {
        match self {
            DocKind::Function => "functions",
            DocKind::Method => "methods",
            DocKind::Constructor => "constructors",
            DocKind::Field => "fields",
            DocKind::ClassField => "class fields",
            DocKind::Enum => "enums",
            DocKind::Constant => "constants",
            DocKind::GlobalVar => "globals",
        }
    }

    /// Human-readable heading label.
    pub fn label(self) -> &'static str {
        match self {
            DocKind::Function => "Class methods",
            DocKind::Method => "Instance methods",
            DocKind::Constructor => "Instance constructors",
            DocKind::Field => "Instance fields",
            DocKind::ClassField => "Class fields",
            DocKind::Enum => "Enums",
            DocKind::Constant => "Constants",
            DocKind::GlobalVar => "Globals",
        }
    }

    pub fn is_field(self) -> bool {
        matches!(self, DocKind::Field | DocKind::ClassField)
    }
}

/// A documented parameter. The label carries the full `\param` text,
/// including the trailing type-signature fragment in parentheses.
#[derive(Debug)]
pub struct ParamDoc {
    pub label: String,
    pub optional: bool,
}

/// Kind-specific payload of a documentation record.
#[derive(Debug)]
pub enum Detail {
    Callable {
        params: Vec<ParamDoc>,
        returns: Option<String>,
    },
    Enum {
        prefix: Option<String>,
    },
    /// Constants and fields. Constants never set `default_value`.
    Value {
        value_type: Option<String>,
        default_value: Option<String>,
    },
    Plain,
}

/// One parsed documentation record. Descriptions, parameter labels, and
/// return text keep their inline `<linkto>` tags; resolution happens at
/// render time.
#[derive(Debug)]
pub struct DocRecord {
    pub kind: DocKind,
    pub title: String,
    pub description: Option<String>,
    pub namespace: Option<String>,
    pub detail: Detail,
}

impl DocRecord {
    /// The externally visible, namespace-qualified name. Methods and
    /// instance fields lowercase their namespace; class fields keep it.
    /// A record missing its namespace falls back to the bare title.
    pub fn qualified_title(&self) -> String {
        let ns = match self.namespace.as_deref() {
            Some(ns) => ns,
            None => return self.title.clone(),
        };
        match self.kind {
            DocKind::Method | DocKind::Field => {
                format!("{}.{}", ns.to_lowercase(), self.title)
            }
            DocKind::ClassField => format!("{}.{}", ns, self.title),
            _ => self.title.clone(),
        }
    }

    /// Deterministic in-document link target id.
    pub fn anchor(&self) -> String {
        format!(
            "Reference_{}_{}",
            self.kind.slug(),
            self.qualified_title().replace('.', "_")
        )
    }
}

/// Anchor id for a namespace heading.
pub fn namespace_anchor(name: &str) -> String {
    format!("Reference_{}", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: DocKind, title: &str, namespace: Option<&str>) -> DocRecord {
        DocRecord {
            kind,
            title: title.to_string(),
            description: None,
            namespace: namespace.map(|s| s.to_string()),
            detail: Detail::Plain,
        }
    }

    #[test]
    fn method_title_lowercases_namespace() {
        let rec = record(DocKind::Method, "Update", Some("Entity"));
        assert_eq!(rec.qualified_title(), "entity.Update");
        assert_eq!(rec.anchor(), "Reference_methods_entity_Update");
    }

    #[test]
    fn field_title_lowercases_namespace() {
        let rec = record(DocKind::Field, "X", Some("Entity"));
        assert_eq!(rec.qualified_title(), "entity.X");
    }

    #[test]
    fn class_field_keeps_namespace_case() {
        let rec = record(DocKind::ClassField, "Count", Some("Entity"));
        assert_eq!(rec.qualified_title(), "Entity.Count");
        assert_eq!(rec.anchor(), "Reference_class fields_Entity_Count");
    }

    #[test]
    fn constructor_is_not_lowercased() {
        // Constructor titles are already the namespace name.
        let rec = record(DocKind::Constructor, "Entity", Some("Entity"));
        assert_eq!(rec.qualified_title(), "Entity");
        assert_eq!(rec.anchor(), "Reference_constructors_Entity");
    }

    #[test]
    fn function_title_unqualified() {
        let rec = record(DocKind::Function, "Abs", Some("Math"));
        assert_eq!(rec.qualified_title(), "Abs");
        assert_eq!(rec.anchor(), "Reference_functions_Abs");
    }

    #[test]
    fn missing_namespace_falls_back_to_title() {
        let rec = record(DocKind::Method, "Update", None);
        assert_eq!(rec.qualified_title(), "Update");
        assert_eq!(rec.anchor(), "Reference_methods_Update");
    }

    #[test]
    fn kind_order_is_stable() {
        assert_eq!(DocKind::Function.index(), 0);
        assert_eq!(DocKind::GlobalVar.index(), KIND_COUNT - 1);
        for (i, kind) in DocKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
