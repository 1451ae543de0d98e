//! C# declaration extractor using Tree-sitter.

use std::path::{Path, PathBuf};
use tree_sitter::{Language, Node, Parser};

use aggregate_lint_core::{
    ConstructorBody, ConstructorDeclaration, Location, Member, MethodDeclaration, Modifier,
    TypeDeclaration, TypeKind,
};

/// Errors from turning source text into declarations.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load C# grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The parser produced no tree.
    #[error("failed to parse {path}")]
    Parse {
        /// File being parsed.
        path: PathBuf,
    },
}

/// Type declarations extracted from a single source file.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// Path the locations refer to.
    pub file_path: PathBuf,
    /// Top-level types (including those inside namespaces), in source order.
    pub types: Vec<TypeDeclaration>,
    /// Whether tree-sitter had to recover from syntax errors.
    pub has_syntax_errors: bool,
}

/// Extracts type, constructor and method declarations from C# source.
pub struct CSharpExtractor {
    language: Language,
}

impl CSharpExtractor {
    /// File extensions handled by this extractor.
    pub const EXTENSIONS: &'static [&'static str] = &["cs"];

    /// Creates a new C# extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_c_sharp::LANGUAGE.into(),
        }
    }

    /// Whether `path` has a C# extension.
    #[must_use]
    pub fn handles(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| Self::EXTENSIONS.contains(&e))
    }

    /// Parses `source` and collects its type declarations.
    ///
    /// Locations in the result refer to `file`.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or no tree is produced.
    /// Syntax errors inside the source are not errors; see
    /// [`SourceUnit::has_syntax_errors`].
    pub fn extract(&self, file: &Path, source: &str) -> Result<SourceUnit, ExtractError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ExtractError::Parse {
                path: file.to_path_buf(),
            })?;
        let root = tree.root_node();

        let walker = Walker {
            src: source.as_bytes(),
            file,
        };
        let mut types = Vec::new();
        walker.collect_types(root, &mut types);

        Ok(SourceUnit {
            file_path: file.to_path_buf(),
            types,
            has_syntax_errors: root.has_error(),
        })
    }
}

impl Default for CSharpExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn type_kind(node_kind: &str) -> Option<TypeKind> {
    match node_kind {
        "class_declaration" => Some(TypeKind::Class),
        "struct_declaration" => Some(TypeKind::Struct),
        "record_declaration" | "record_struct_declaration" => Some(TypeKind::Record),
        "interface_declaration" => Some(TypeKind::Interface),
        _ => None,
    }
}

fn is_trivia(node_kind: &str) -> bool {
    node_kind == "comment" || node_kind.starts_with("preproc")
}

struct Walker<'a> {
    src: &'a [u8],
    file: &'a Path,
}

impl<'a> Walker<'a> {
    fn text(&self, node: Node<'_>) -> &'a str {
        node.utf8_text(self.src).unwrap_or("")
    }

    fn location(&self, node: Node<'_>) -> Location {
        let start = node.start_position();
        Location::new(self.file, start.row + 1, start.column + 1)
            .with_span(node.start_byte(), node.end_byte() - node.start_byte())
    }

    /// Finds type declarations below `node`, descending through namespaces
    /// and anything else that is not itself a type.
    fn collect_types(&self, node: Node<'_>, out: &mut Vec<TypeDeclaration>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match type_kind(child.kind()) {
                Some(kind) => out.push(self.type_declaration(child, kind)),
                None => self.collect_types(child, out),
            }
        }
    }

    fn type_declaration(&self, node: Node<'_>, kind: TypeKind) -> TypeDeclaration {
        let name = self.declared_name(node).to_owned();

        let mut base_types = None;
        let mut body = node.child_by_field_name("body");
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "base_list" => base_types = Some(self.base_types(child)),
                "declaration_list" if body.is_none() => body = Some(child),
                _ => {}
            }
        }

        let members = body
            .map(|body| self.members(body, &name))
            .unwrap_or_default();

        TypeDeclaration {
            name,
            kind,
            base_types,
            members,
            location: self.location(node),
        }
    }

    fn base_types(&self, base_list: Node<'_>) -> Vec<String> {
        let mut cursor = base_list.walk();
        base_list
            .named_children(&mut cursor)
            .filter(|n| !is_trivia(n.kind()) && n.kind() != "argument_list")
            .map(|n| self.text(n).to_owned())
            .collect()
    }

    fn members(&self, body: Node<'_>, owner: &str) -> Vec<Member> {
        let mut members = Vec::new();
        self.collect_members(body, owner, &mut members);
        members
    }

    /// Conditional-compilation blocks are walked in every branch, since the
    /// active symbols are unknown.
    fn collect_members(&self, node: Node<'_>, owner: &str, out: &mut Vec<Member>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "constructor_declaration" => {
                    out.push(Member::Constructor(self.constructor(child, owner)));
                }
                "method_declaration" => {
                    out.push(Member::Method(self.method(child, owner)));
                }
                kind if kind.starts_with("preproc_") => self.collect_members(child, owner, out),
                kind => {
                    if let Some(kind) = type_kind(kind) {
                        out.push(Member::Type(self.type_declaration(child, kind)));
                    }
                }
            }
        }
    }

    fn constructor(&self, node: Node<'_>, owner: &str) -> ConstructorDeclaration {
        let mut body = ConstructorBody::Absent;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "block" => {
                    body = ConstructorBody::Block {
                        statements: statement_count(child),
                    };
                }
                "arrow_expression_clause" => body = ConstructorBody::Expression,
                _ => {}
            }
        }

        ConstructorDeclaration {
            owner: owner.to_owned(),
            name: self.declared_name(node).to_owned(),
            modifiers: self.modifiers(node),
            parameter_count: parameter_count(node),
            body,
            location: self.location(node),
        }
    }

    fn method(&self, node: Node<'_>, owner: &str) -> MethodDeclaration {
        MethodDeclaration {
            owner: owner.to_owned(),
            name: self.declared_name(node).to_owned(),
            modifiers: self.modifiers(node),
            location: self.location(node),
        }
    }

    /// The `name` field, or else the last identifier before the parameter
    /// list or body (skipping a return type written as an identifier).
    fn declared_name(&self, node: Node<'_>) -> &'a str {
        if let Some(name) = node.child_by_field_name("name") {
            return self.text(name);
        }

        let mut name = "";
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "identifier" => name = self.text(child),
                "parameter_list" | "type_parameter_list" | "base_list" | "declaration_list" => {
                    break;
                }
                _ => {}
            }
        }
        name
    }

    fn modifiers(&self, node: Node<'_>) -> Vec<Modifier> {
        let mut modifiers = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "modifier" => modifiers.push(Modifier::from_keyword(self.text(child).trim())),
                kw @ ("public" | "private" | "protected" | "internal") if !child.is_named() => {
                    modifiers.push(Modifier::from_keyword(kw));
                }
                _ => {}
            }
        }
        modifiers
    }

}

fn parameter_count(node: Node<'_>) -> usize {
    let list = node.child_by_field_name("parameters").or_else(|| {
        let mut cursor = node.walk();
        let found = node
            .children(&mut cursor)
            .find(|c| c.kind() == "parameter_list");
        found
    });

    list.map_or(0, |list| {
        let mut cursor = list.walk();
        let count = list
            .named_children(&mut cursor)
            .filter(|p| p.kind() == "parameter")
            .count();
        count
    })
}

fn statement_count(block: Node<'_>) -> usize {
    let mut cursor = block.walk();
    let count = block
        .named_children(&mut cursor)
        .filter(|n| !is_trivia(n.kind()))
        .count();
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(src: &str) -> SourceUnit {
        CSharpExtractor::new()
            .extract(Path::new("Order.cs"), src)
            .expect("extraction failed")
    }

    fn constructors(ty: &TypeDeclaration) -> Vec<&ConstructorDeclaration> {
        ty.members
            .iter()
            .filter_map(|m| match m {
                Member::Constructor(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    fn methods(ty: &TypeDeclaration) -> Vec<&MethodDeclaration> {
        ty.members
            .iter()
            .filter_map(|m| match m {
                Member::Method(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn extracts_class_with_generic_base() {
        let unit = extract(
            "namespace Shop.Domain\n{\n    public class Order : AggregateRoot<OrderState>, IDisposable\n    {\n    }\n}\n",
        );
        assert_eq!(unit.types.len(), 1);
        let ty = &unit.types[0];
        assert_eq!(ty.name, "Order");
        assert_eq!(ty.kind, TypeKind::Class);
        assert_eq!(
            ty.base_types.as_deref(),
            Some(&["AggregateRoot<OrderState>".to_owned(), "IDisposable".to_owned()][..])
        );
        assert_eq!(ty.location.line, 3);
        assert_eq!(ty.location.column, 5);
    }

    #[test]
    fn class_without_base_list_has_none() {
        let unit = extract("class Order { }\n");
        assert!(unit.types[0].base_types.is_none());
    }

    #[test]
    fn file_scoped_namespace() {
        let unit = extract("namespace Shop.Domain;\n\npublic class Order : AggregateRoot { }\n");
        assert_eq!(unit.types.len(), 1);
        assert_eq!(unit.types[0].name, "Order");
    }

    #[test]
    fn extracts_constructors() {
        let unit = extract(
            r"
public class AggregateOrder : AggregateRoot
{
    public AggregateOrder() { }
    private AggregateOrder(int id, string name)
    {
        Id = id;
        Name = name;
    }
    internal AggregateOrder(string name) => Name = name;
}
",
        );
        let ctors = constructors(&unit.types[0]);
        assert_eq!(ctors.len(), 3);

        assert_eq!(ctors[0].name, "AggregateOrder");
        assert_eq!(ctors[0].owner, "AggregateOrder");
        assert!(ctors[0].is_public());
        assert_eq!(ctors[0].parameter_count, 0);
        assert_eq!(ctors[0].body, ConstructorBody::Block { statements: 0 });
        assert_eq!(ctors[0].location.line, 4);

        assert!(ctors[1].is_private());
        assert_eq!(ctors[1].parameter_count, 2);
        assert_eq!(ctors[1].body, ConstructorBody::Block { statements: 2 });

        assert_eq!(ctors[2].modifiers, vec![Modifier::Internal]);
        assert_eq!(ctors[2].body, ConstructorBody::Expression);
    }

    #[test]
    fn comments_are_not_statements() {
        let unit = extract("class AggregateOrder { public AggregateOrder() { // nothing\n } }\n");
        let ctors = constructors(&unit.types[0]);
        assert_eq!(ctors[0].body, ConstructorBody::Block { statements: 0 });
    }

    #[test]
    fn extracts_method_name_not_return_type() {
        let unit = extract(
            r"
public class Order : AggregateRoot<OrderState>
{
    private Order Apply(OrderPlaced e) { return this; }
    public void Apply(OrderShipped e) { }
}
",
        );
        let methods = methods(&unit.types[0]);
        assert_eq!(methods.len(), 2);
        assert_eq!(methods[0].name, "Apply");
        assert_eq!(methods[0].owner, "Order");
        assert_eq!(methods[0].modifiers, vec![Modifier::Private]);
        assert!(methods[1].is_public());
    }

    #[test]
    fn extracts_nested_types() {
        let unit = extract(
            r"
public class Outer
{
    private class Inner : AggregateRoot
    {
        void Apply(Evt e) { }
    }
}
",
        );
        let Member::Type(inner) = &unit.types[0].members[0] else {
            panic!("expected nested type");
        };
        assert_eq!(inner.name, "Inner");
        assert_eq!(methods(inner)[0].name, "Apply");
        assert!(methods(inner)[0].modifiers.is_empty());
    }

    #[test]
    fn members_inside_conditional_blocks() {
        let unit = extract(
            r"
class AggregateOrder : AggregateRoot
{
#if DEBUG
    private AggregateOrder() { Log(); }
    private void Apply(OrderPlaced e) { }
#elif TRACE
    void Apply(OrderShipped e) { }
#else
    public AggregateOrder(int id) { }
#endif
}
",
        );
        let ty = &unit.types[0];
        assert_eq!(constructors(ty).len(), 2);
        assert_eq!(constructors(ty)[0].body, ConstructorBody::Block { statements: 1 });
        assert_eq!(constructors(ty)[1].parameter_count, 1);
        assert_eq!(methods(ty).len(), 2);
        assert!(methods(ty).iter().all(|m| m.name == "Apply" && m.owner == "AggregateOrder"));
    }

    #[test]
    fn extracts_struct_and_interface_kinds() {
        let unit = extract("struct Money { }\ninterface IOrder { }\n");
        let kinds: Vec<TypeKind> = unit.types.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, [TypeKind::Struct, TypeKind::Interface]);
    }

    #[test]
    fn span_covers_declaration() {
        let src = "class A { public A() { } }";
        let unit = extract(src);
        let ctor = constructors(&unit.types[0])[0];
        let span = &src[ctor.location.offset..ctor.location.offset + ctor.location.length];
        assert_eq!(span, "public A() { }");
    }

    #[test]
    fn empty_source() {
        let unit = extract("");
        assert!(unit.types.is_empty());
        assert!(!unit.has_syntax_errors);
    }

    #[test]
    fn syntax_errors_are_flagged_not_fatal() {
        let unit = extract("class AggregateOrder { public AggregateOrder() { int x = ; } }\n");
        assert!(unit.has_syntax_errors);
    }

    #[test]
    fn handles_cs_extension_only() {
        assert!(CSharpExtractor::handles(Path::new("src/Order.cs")));
        assert!(!CSharpExtractor::handles(Path::new("src/order.rs")));
        assert!(!CSharpExtractor::handles(Path::new("Makefile")));
    }
}
