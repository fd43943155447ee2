use super::*;
use crate::error::RepoError;

const TABLE: &str = r#"public."Users""#;

#[test]
fn formats_schema_qualified_table() {
    assert_eq!(format_table_name("public", "users").unwrap(), TABLE);
    assert_eq!(format_table_name("app", "Users").unwrap(), r#"app."Users""#);
}

#[test]
fn select_lists_all_columns_without_terminator() {
    assert_eq!(
        select_template(TABLE, &["id", "name", "age"]).unwrap(),
        r#"SELECT "Id", "Name", "Age" FROM public."Users""#
    );
}

#[test]
fn insert_columns_and_values_share_order() {
    assert_eq!(
        insert_template(TABLE, &["id", "name", "age"]).unwrap(),
        r#"INSERT INTO public."Users" ("Id", "Name", "Age") VALUES (@Id, @Name, @Age);"#
    );
}

#[test]
fn delete_filters_on_primary_keys() {
    assert_eq!(
        delete_template(TABLE, &["id"]).unwrap(),
        r#"DELETE FROM public."Users" WHERE "Id" = @Id;"#
    );
}

#[test]
fn composite_keys_are_joined_with_and() {
    assert_eq!(
        delete_template(TABLE, &["tenantId", "id"]).unwrap(),
        r#"DELETE FROM public."Users" WHERE "TenantId" = @TenantId AND "Id" = @Id;"#
    );
    assert_eq!(
        update_template(TABLE, &["name"], &["tenantId", "id"]).unwrap(),
        r#"UPDATE public."Users" SET "Name" = @Name WHERE "TenantId" = @TenantId AND "Id" = @Id;"#
    );
}

#[test]
fn update_sets_non_key_columns() {
    assert_eq!(
        update_template(TABLE, &["name", "age"], &["id"]).unwrap(),
        r#"UPDATE public."Users" SET "Name" = @Name, "Age" = @Age WHERE "Id" = @Id;"#
    );
}

#[test]
fn builds_all_templates() {
    let t = Templates::build(TABLE, &["id", "name", "age"], &["id"], &["name", "age"]).unwrap();
    assert_eq!(t.select, r#"SELECT "Id", "Name", "Age" FROM public."Users""#);
    assert_eq!(
        t.insert,
        r#"INSERT INTO public."Users" ("Id", "Name", "Age") VALUES (@Id, @Name, @Age);"#
    );
    assert_eq!(t.delete, r#"DELETE FROM public."Users" WHERE "Id" = @Id;"#);
    assert_eq!(
        t.update,
        r#"UPDATE public."Users" SET "Name" = @Name, "Age" = @Age WHERE "Id" = @Id;"#
    );
}

#[test]
fn key_only_entity_cannot_build_update() {
    let err = Templates::build(TABLE, &["id"], &["id"], &[]).unwrap_err();
    assert!(matches!(err, RepoError::EmptyJoin("UPDATE SET list")));
}

#[test]
fn entity_without_primary_key_fails() {
    let err = Templates::build(TABLE, &["name"], &[], &["name"]).unwrap_err();
    assert!(matches!(err, RepoError::EmptyJoin("DELETE key predicate")));
}

#[test]
fn entity_without_columns_fails() {
    let err = Templates::build(TABLE, &[], &[], &[]).unwrap_err();
    assert!(matches!(err, RepoError::EmptyJoin("SELECT column list")));
}

#[test]
fn where_clause_joins_predicates() {
    assert_eq!(
        build_where_clause(["name", "age"]).unwrap(),
        r#"WHERE "Name" = @Name AND "Age" = @Age;"#
    );
    assert_eq!(build_where_clause(["id"]).unwrap(), r#"WHERE "Id" = @Id;"#);
}

#[test]
fn where_clause_rejects_empty_list() {
    let err = build_where_clause(Vec::<&str>::new()).unwrap_err();
    assert!(matches!(err, RepoError::EmptyJoin("WHERE clause")));
}

#[test]
fn select_composes_with_where_clause() {
    let select = select_template(TABLE, &["id", "name"]).unwrap();
    let filter = build_where_clause(["name"]).unwrap();
    assert_eq!(
        format!("{select} {filter}"),
        r#"SELECT "Id", "Name" FROM public."Users" WHERE "Name" = @Name;"#
    );
}
