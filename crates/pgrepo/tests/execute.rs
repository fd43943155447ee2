mod common;

use common::{RecordingClient, User};
use pgrepo::{RepoError, Repository, Request};
use tokio_postgres::types::Type;
use uuid::Uuid;

#[tokio::test]
async fn update_issues_one_parameterized_statement() {
    let client = RecordingClient::affecting(1);
    let repo = Repository::<User, _>::new(&client, "app", "users").unwrap();
    let id = Uuid::new_v4();

    let request = Request::new().with("name", "Alice").with("age", 30).with("id", id);
    let affected = repo.execute_command(repo.update_sql(), &request).await.unwrap();

    assert_eq!(affected, 1);
    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].sql,
        r#"UPDATE app."Users" SET "Name" = $1, "Age" = $2 WHERE "Id" = $3;"#
    );
    assert_eq!(calls[0].types, [Type::TEXT, Type::INT4, Type::UUID]);
    assert_eq!(calls[0].values[0], r#"Text("Alice")"#);
    assert_eq!(calls[0].values[2], format!("Guid({id:?})"));
}

#[tokio::test]
async fn hand_written_lower_case_placeholder_binds_argument() {
    let client = RecordingClient::default();
    let repo = Repository::<User, _>::new(&client, "public", "users").unwrap();

    let sql = format!(r#"{} WHERE "Name" = @name;"#, repo.select_sql());
    let users = repo
        .query(&sql, &Request::new().with("name", "Alice"))
        .await
        .unwrap();

    assert!(users.is_empty());
    let calls = client.calls();
    assert_eq!(
        calls[0].sql,
        r#"SELECT "Id", "Name", "Age" FROM public."Users" WHERE "Name" = $1;"#
    );
    assert_eq!(calls[0].types, [Type::TEXT]);
}

#[tokio::test]
async fn template_text_is_stable_across_calls() {
    let client = RecordingClient::default();
    let repo = Repository::<User, _>::new(&client, "public", "users").unwrap();

    let first = repo.select_sql().to_string();
    repo.query(repo.select_sql(), &Request::new()).await.unwrap();
    repo.query(repo.select_sql(), &Request::new()).await.unwrap();

    let calls = client.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].sql, calls[1].sql);
    assert_eq!(calls[0].sql, first);
    assert!(calls[0].types.is_empty());
    assert_eq!(repo.select_sql(), first);
}

#[tokio::test]
async fn query_single_without_rows_is_not_found() {
    let client = RecordingClient::default();
    let repo = Repository::<User, _>::new(&client, "public", "users").unwrap();
    let request = Request::new().with("id", Uuid::new_v4());

    let sql = repo.select_where(request.properties()).unwrap();
    let err = repo.query_single(&sql, &request).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        client.calls()[0].sql,
        r#"SELECT "Id", "Name", "Age" FROM public."Users" WHERE "Id" = $1;"#
    );
}

#[tokio::test]
async fn missing_parameter_fails_before_execution() {
    let client = RecordingClient::default();
    let repo = Repository::<User, _>::new(&client, "public", "users").unwrap();

    let err = repo
        .execute_command(repo.delete_sql(), &Request::new().with("name", "x"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::MissingParameter(ref n) if n == "Id"));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn duplicate_parameter_fails_before_execution() {
    let client = RecordingClient::default();
    let repo = Repository::<User, _>::new(&client, "public", "users").unwrap();

    let request = Request::new().with("id", 1).with("Id", 2);
    let err = repo
        .execute_command(repo.delete_sql(), &request)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::DuplicateParameter(_)));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn entity_helpers_bind_their_templates() {
    let client = RecordingClient::affecting(1);
    let repo = Repository::<User, _>::new(&client, "public", "users").unwrap();
    let user = User {
        id: Uuid::new_v4(),
        name: "Carol".to_string(),
        age: 52,
    };

    repo.insert(&user).await.unwrap();
    repo.update(&user).await.unwrap();
    repo.delete(&user).await.unwrap();

    let calls = client.calls();
    assert_eq!(
        calls[0].sql,
        r#"INSERT INTO public."Users" ("Id", "Name", "Age") VALUES ($1, $2, $3);"#
    );
    assert_eq!(calls[0].types, [Type::UUID, Type::TEXT, Type::INT4]);
    assert_eq!(
        calls[1].sql,
        r#"UPDATE public."Users" SET "Name" = $1, "Age" = $2 WHERE "Id" = $3;"#
    );
    assert_eq!(calls[1].types, [Type::TEXT, Type::INT4, Type::UUID]);
    // Non-key arguments are bound but not sent.
    assert_eq!(calls[2].sql, r#"DELETE FROM public."Users" WHERE "Id" = $1;"#);
    assert_eq!(calls[2].types, [Type::UUID]);
}

#[tokio::test]
async fn find_where_filters_on_request() {
    let client = RecordingClient::default();
    let repo = Repository::<User, _>::new(&client, "public", "users").unwrap();

    let users = repo
        .find_where(&Request::new().with("name", "Dan").with("age", 20))
        .await
        .unwrap();
    assert!(users.is_empty());
    assert_eq!(
        client.calls()[0].sql,
        r#"SELECT "Id", "Name", "Age" FROM public."Users" WHERE "Name" = $1 AND "Age" = $2;"#
    );
}

#[test]
fn blocking_variants_run_outside_a_runtime() {
    let client = RecordingClient::affecting(3);
    let repo = Repository::<User, _>::new(&client, "public", "users").unwrap();

    let affected = repo
        .blocking_execute_command(
            repo.delete_sql(),
            &Request::new().with("id", Uuid::new_v4()),
        )
        .unwrap();
    assert_eq!(affected, 3);

    let users = repo
        .blocking_query(repo.select_sql(), &Request::new())
        .unwrap();
    assert!(users.is_empty());

    let err = repo
        .blocking_query_single(repo.select_sql(), &Request::new())
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(client.calls().len(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn blocking_variants_run_inside_a_runtime() {
    let client = RecordingClient::affecting(1);
    let repo = Repository::<User, _>::new(&client, "public", "users").unwrap();

    let affected = repo
        .blocking_execute_command(
            repo.delete_sql(),
            &Request::new().with("id", Uuid::new_v4()),
        )
        .unwrap();
    assert_eq!(affected, 1);
}

#[tokio::test]
async fn blocking_variant_in_current_thread_runtime_is_refused() {
    let client = RecordingClient::affecting(1);
    let repo = Repository::<User, _>::new(&client, "public", "users").unwrap();

    let err = repo
        .blocking_query(repo.select_sql(), &Request::new())
        .unwrap_err();
    assert!(matches!(err, RepoError::Runtime(_)));
    assert!(client.calls().is_empty());
}
