use super::*;
use crate::error::ResolveError;
use pretty_assertions::assert_eq;
use usedby_schema::schema::{DirectiveUse, TypeRefKind, UnionType};

fn build(source: &str) -> ReverseIndex {
    let graph = TypeGraph::from_sdl(source).unwrap();
    ReverseIndex::build(&graph).unwrap()
}

fn dependent(name: &str, category: Category) -> Dependent {
    Dependent::new(name, category)
}

// Helper to create an object type from (field name, field type) pairs
fn create_test_object(name: &str, fields: Vec<(&str, TypeRef)>) -> NamedType {
    NamedType::Object(ObjectType {
        name: name.to_string(),
        interfaces: vec![],
        fields: fields
            .into_iter()
            .map(|(field_name, ty)| FieldDef {
                name: field_name.to_string(),
                ty,
                arguments: vec![],
                directives: vec![],
            })
            .collect(),
        directives: vec![],
    })
}

#[test]
fn test_object_field_reference() {
    let index = build(
        r#"
        type Foo { id: ID }
        type Bar { foo: Foo }
        "#,
    );

    assert_eq!(index.lookup("Foo"), &[dependent("Bar", Category::Object)]);
    assert_eq!(index.lookup("ID"), &[dependent("Foo", Category::Object)]);
}

#[test]
fn test_union_members() {
    let index = build(
        r#"
        type Foo { id: ID }
        type Baz { id: ID }
        union Result = Foo | Baz
        "#,
    );

    assert_eq!(index.lookup("Foo"), &[dependent("Result", Category::Union)]);
    assert_eq!(index.lookup("Baz"), &[dependent("Result", Category::Union)]);
}

#[test]
fn test_query_field_records_operation_name() {
    let index = build(
        r#"
        type Foo { name: String }
        type Query { getFoo(id: ID!): Foo }
        "#,
    );

    assert_eq!(index.lookup("Foo"), &[dependent("getFoo", Category::Query)]);
    assert_eq!(index.lookup("ID"), &[dependent("getFoo", Category::Query)]);
    // The root type itself is never recorded
    assert!(index.iter().all(|(_, dependents)| {
        dependents.iter().all(|dependent| dependent.name != "Query")
    }));
}

#[test]
fn test_mutation_and_subscription_roots() {
    let index = build(
        r#"
        type Post { id: ID! }
        input NewPost { title: String! }
        type Mutation { createPost(input: NewPost!): Post }
        type Subscription { postAdded: Post }
        "#,
    );

    assert_eq!(
        index.lookup("Post"),
        &[
            dependent("createPost", Category::Mutation),
            dependent("postAdded", Category::Subscription),
        ]
    );
    assert_eq!(
        index.lookup("NewPost"),
        &[dependent("createPost", Category::Mutation)]
    );
}

#[test]
fn test_schema_block_roots() {
    let index = build(
        r#"
        schema { query: RootQuery }
        type User { id: ID! }
        type RootQuery { viewer: User }
        "#,
    );

    assert_eq!(index.lookup("User"), &[dependent("viewer", Category::Query)]);
}

#[test]
fn test_field_directive_reference() {
    let index = build(
        r#"
        type Legacy { name: String @deprecated(reason: "gone") }
        type Query { old: Legacy @deprecated }
        "#,
    );

    assert_eq!(
        index.lookup("deprecated"),
        &[
            dependent("Legacy", Category::Object),
            dependent("old", Category::Query),
        ]
    );
}

#[test]
fn test_declaration_directives_and_interfaces() {
    let index = build(
        r#"
        interface Node { id: ID! }
        type User implements Node @key(fields: "id") { id: ID! }
        "#,
    );

    assert_eq!(index.lookup("Node"), &[dependent("User", Category::Object)]);
    assert_eq!(index.lookup("key"), &[dependent("User", Category::Object)]);
    assert_eq!(
        index.lookup("ID"),
        &[
            dependent("Node", Category::Interface),
            dependent("User", Category::Object),
        ]
    );
}

#[test]
fn test_object_field_argument_types() {
    let index = build(
        r#"
        input Filter { term: String }
        type Catalog { items(filter: Filter, first: Int): [String] }
        "#,
    );

    assert_eq!(index.lookup("Filter"), &[dependent("Catalog", Category::Object)]);
    assert_eq!(index.lookup("Int"), &[dependent("Catalog", Category::Object)]);
}

#[test]
fn test_input_fields() {
    let index = build(
        r#"
        enum Order { ASC, DESC }
        input Sort { order: Order! @internal, nested: [Sort!] }
        "#,
    );

    assert_eq!(index.lookup("Order"), &[dependent("Sort", Category::Input)]);
    assert_eq!(index.lookup("internal"), &[dependent("Sort", Category::Input)]);
    // Self references are plain accumulation
    assert_eq!(index.lookup("Sort"), &[dependent("Sort", Category::Input)]);
}

#[test]
fn test_one_record_per_declaration() {
    let index = build(
        r#"
        type User { id: ID! }
        type Team {
            owner: User!
            members: [User!]!
            member(id: ID!): User
            find(user: ID, fallback: ID): [User]
        }
        "#,
    );

    assert_eq!(index.lookup("User"), &[dependent("Team", Category::Object)]);
    assert_eq!(
        index.lookup("ID"),
        &[
            dependent("User", Category::Object),
            dependent("Team", Category::Object),
        ]
    );
}

#[test]
fn test_first_writer_wins_across_categories() {
    // An operation field and a type sharing a name are one dependent
    let index = build(
        r#"
        type Profile { id: ID }
        type Query { Profile: ID, account: Profile }
        "#,
    );

    assert_eq!(index.lookup("ID"), &[dependent("Profile", Category::Object)]);
    assert_eq!(
        index.lookup("Profile"),
        &[dependent("account", Category::Query)]
    );
}

#[test]
fn test_records_follow_traversal_order() {
    let index = build(
        r#"
        type Zeta { shared: Shared }
        type Alpha { shared: Shared }
        union Mid = Shared
        type Shared { id: ID }
        input Last { shared: ID }
        "#,
    );

    assert_eq!(
        index.lookup("Shared"),
        &[
            dependent("Zeta", Category::Object),
            dependent("Alpha", Category::Object),
            dependent("Mid", Category::Union),
        ]
    );

    let targets: Vec<_> = index.iter().map(|(target, _)| target).collect();
    assert_eq!(targets, vec!["Shared", "ID"]);
}

#[test]
fn test_scalars_and_enums_emit_nothing() {
    let index = build(
        r#"
        scalar Date @specifiedBy(url: "https://example.com")
        enum Color @flag { RED, GREEN }
        type Paint { color: Color, dried: Date }
        "#,
    );

    assert_eq!(index.lookup("Color"), &[dependent("Paint", Category::Object)]);
    assert_eq!(index.lookup("Date"), &[dependent("Paint", Category::Object)]);
    assert!(!index.contains("specifiedBy"));
    assert!(!index.contains("flag"));
    assert!(index.iter().all(|(_, dependents)| {
        dependents
            .iter()
            .all(|dependent| dependent.name != "Date" && dependent.name != "Color")
    }));
}

#[test]
fn test_unknown_lookup_is_empty() {
    let index = build("type Leaf { value: String }");

    assert!(index.lookup("Leaf").is_empty());
    assert!(index.lookup("DoesNotExist").is_empty());
}

#[test]
fn test_introspection_types_are_skipped() {
    let mut graph = TypeGraph::from_sdl("type User { id: ID }").unwrap();
    graph
        .insert(create_test_object(
            "__Type",
            vec![("ofType", TypeRef::named("__Type"))],
        ))
        .unwrap();

    let index = ReverseIndex::build(&graph).unwrap();
    assert!(!index.contains("__Type"));
    assert_eq!(index.len(), 1);
}

#[test]
fn test_missing_operation_root_is_skipped() {
    let mut graph = TypeGraph::from_sdl("type User { id: ID }").unwrap();
    graph.set_root(OperationKind::Mutation, "Mutation");

    let index = ReverseIndex::build(&graph).unwrap();
    assert_eq!(index.lookup("ID"), &[dependent("User", Category::Object)]);
}

#[test]
fn test_non_object_root_is_indexed_as_declaration() {
    let mut graph = TypeGraph::from_sdl("union Query = Foo").unwrap();
    graph.set_root(OperationKind::Query, "Query");

    let index = ReverseIndex::build(&graph).unwrap();
    assert_eq!(index.lookup("Foo"), &[dependent("Query", Category::Union)]);
}

#[test]
fn test_malformed_reference_fails_the_build() {
    let mut graph = TypeGraph::new();
    graph
        .insert(create_test_object(
            "Broken",
            vec![(
                "items",
                TypeRef {
                    kind: TypeRefKind::List,
                    name: None,
                    of_type: None,
                },
            )],
        ))
        .unwrap();

    let result = ReverseIndex::build(&graph);
    match result {
        Err(IndexError::MalformedReference {
            declaration,
            source,
        }) => {
            assert_eq!(declaration, "Broken.items");
            assert_eq!(
                source,
                ResolveError::MissingInnerType {
                    kind: TypeRefKind::List
                }
            );
        }
        other => panic!("Expected MalformedReference error, got {other:?}"),
    }
}

#[test]
fn test_malformed_union_member() {
    let mut graph = TypeGraph::new();
    graph
        .insert(NamedType::Union(UnionType {
            name: "Anything".to_string(),
            members: vec![TypeRef {
                kind: TypeRefKind::Named,
                name: None,
                of_type: None,
            }],
            directives: vec![DirectiveUse::new("tag")],
        }))
        .unwrap();

    let result = ReverseIndex::build(&graph);
    assert!(matches!(
        result,
        Err(IndexError::MalformedReference { declaration, source: ResolveError::UnnamedType })
            if declaration == "Anything"
    ));
}

#[test]
fn test_extend_accumulates_across_graphs() {
    let first = TypeGraph::from_sdl("type Order { id: ID }").unwrap();
    let second = TypeGraph::from_sdl("type Invoice { id: ID, order: Order }").unwrap();

    let mut index = ReverseIndex::build(&first).unwrap();
    index.extend(&second).unwrap();

    assert_eq!(
        index.lookup("ID"),
        &[
            dependent("Order", Category::Object),
            dependent("Invoice", Category::Object),
        ]
    );
    assert_eq!(index.lookup("Order"), &[dependent("Invoice", Category::Object)]);

    // Extending with the same graph again adds nothing
    index.extend(&second).unwrap();
    assert_eq!(index.lookup("ID").len(), 2);
}

#[test]
fn test_failed_extend_leaves_index_untouched() {
    let good = TypeGraph::from_sdl("type Order { id: ID }").unwrap();
    let mut bad = TypeGraph::from_sdl("type Invoice { id: ID }").unwrap();
    bad.insert(create_test_object(
        "Broken",
        vec![(
            "items",
            TypeRef {
                kind: TypeRefKind::NonNull,
                name: None,
                of_type: None,
            },
        )],
    ))
    .unwrap();

    let mut index = ReverseIndex::build(&good).unwrap();
    assert!(index.extend(&bad).is_err());
    assert_eq!(index.lookup("ID"), &[dependent("Order", Category::Object)]);
}

#[test]
fn test_clear_resets_the_index() {
    let mut index = build("type Foo { id: ID }");
    assert!(!index.is_empty());

    index.clear();
    assert!(index.is_empty());
    assert!(index.lookup("ID").is_empty());
}

#[test]
fn test_index_outlives_graph() {
    let index = {
        let graph = TypeGraph::from_sdl("type Foo { bar: Bar } type Bar { id: ID }").unwrap();
        ReverseIndex::build(&graph).unwrap()
    };

    assert_eq!(index.lookup("Bar"), &[dependent("Foo", Category::Object)]);
}

#[test]
fn test_category_names() {
    let names: Vec<_> = [
        Category::Object,
        Category::Interface,
        Category::Union,
        Category::Input,
        Category::Query,
        Category::Mutation,
        Category::Subscription,
    ]
    .iter()
    .map(ToString::to_string)
    .collect();

    assert_eq!(
        names,
        vec![
            "object",
            "interface",
            "union",
            "input",
            "query",
            "mutation",
            "subscription"
        ]
    );
    assert_eq!(Category::from(OperationKind::Mutation), Category::Mutation);
}
