mod common;

use axum::http::StatusCode;
use common::{
    add_member, body_json, build_test_app, create_in_project, create_project, create_user,
    get_auth, post_json_auth,
};
use serde_json::json;
use sqlx::PgPool;

async fn new_project(pool: &PgPool, token: &str, collaborative: bool) -> i64 {
    create_project(
        pool,
        token,
        json!({
            "name": "Metrics",
            "project_type": "SequenceLabeling",
            "collaborative_annotation": collaborative,
        }),
    )
    .await
}

async fn examples(pool: &PgPool, token: &str, project_id: i64, n: usize) -> Vec<i64> {
    let mut ids = Vec::with_capacity(n);
    for i in 0..n {
        ids.push(
            create_in_project(
                pool,
                token,
                project_id,
                "examples",
                json!({ "text": format!("Example number {i} mentions Paris") }),
            )
            .await,
        );
    }
    ids
}

async fn label_type(pool: &PgPool, token: &str, project_id: i64, kind: &str, text: &str) -> i64 {
    create_in_project(
        pool,
        token,
        project_id,
        "label-types",
        json!({ "kind": kind, "text": text }),
    )
    .await
}

async fn toggle(
    pool: &PgPool,
    token: &str,
    project_id: i64,
    example_id: i64,
    label_type_id: Option<i64>,
) -> bool {
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/examples/{example_id}/states"),
        token,
        json!({ "label_type_id": label_type_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["confirmed"].as_bool().unwrap()
}

async fn label(
    pool: &PgPool,
    token: &str,
    project_id: i64,
    example_id: i64,
    collection: &str,
    body: serde_json::Value,
) -> axum::response::Response {
    post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/projects/{project_id}/examples/{example_id}/{collection}"),
        token,
        body,
    )
    .await
}

async fn get_json(pool: &PgPool, token: &str, uri: &str) -> serde_json::Value {
    let response = get_auth(build_test_app(pool.clone()), uri, token).await;
    assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
    body_json(response).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn progress_counts_the_callers_confirmations(pool: PgPool) {
    let (_, admin_token) = create_user(&pool, "admin", true, false).await;
    let (annotator, annotator_token) = create_user(&pool, "ann", false, false).await;
    let project_id = new_project(&pool, &admin_token, false).await;
    add_member(&pool, &admin_token, project_id, annotator.id, "annotator").await;
    let ids = examples(&pool, &admin_token, project_id, 10).await;

    for id in &ids[..4] {
        assert!(toggle(&pool, &admin_token, project_id, *id, None).await);
    }

    let uri = format!("/api/v1/projects/{project_id}/progress");
    let json = get_json(&pool, &admin_token, &uri).await;
    assert_eq!(json, json!({ "total": 10, "complete": 4, "remaining": 6 }));

    let json = get_json(&pool, &annotator_token, &uri).await;
    assert_eq!(json, json!({ "total": 10, "complete": 0, "remaining": 10 }));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn toggling_twice_unconfirms(pool: PgPool) {
    let (_, token) = create_user(&pool, "admin", true, false).await;
    let project_id = new_project(&pool, &token, false).await;
    let ids = examples(&pool, &token, project_id, 1).await;

    assert!(toggle(&pool, &token, project_id, ids[0], None).await);
    assert!(!toggle(&pool, &token, project_id, ids[0], None).await);

    let json = get_json(&pool, &token, &format!("/api/v1/projects/{project_id}/progress")).await;
    assert_eq!(json["complete"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn members_progress_in_a_collaborative_project(pool: PgPool) {
    let (_, admin_token) = create_user(&pool, "admin", true, false).await;
    let (bob, bob_token) = create_user(&pool, "bob", false, false).await;
    let project_id = new_project(&pool, &admin_token, true).await;
    add_member(&pool, &admin_token, project_id, bob.id, "annotator").await;
    let ids = examples(&pool, &admin_token, project_id, 5).await;

    toggle(&pool, &admin_token, project_id, ids[0], None).await;
    toggle(&pool, &bob_token, project_id, ids[1], None).await;
    toggle(&pool, &bob_token, project_id, ids[2], None).await;

    let json = get_json(
        &pool,
        &admin_token,
        &format!("/api/v1/projects/{project_id}/members-progress"),
    )
    .await;
    assert_eq!(json["total"], 5);
    let progress = json["progress"].as_array().unwrap();
    assert_eq!(progress.len(), 2);
    assert_eq!(progress[0]["username"], "admin");
    assert_eq!(progress[1]["username"], "bob");
    for member in progress {
        assert_eq!(member["complete"], 3);
        assert_eq!(member["remaining"], 2);
    }

    // Shared state: bob un-confirms an example the admin confirmed.
    assert!(!toggle(&pool, &bob_token, project_id, ids[0], None).await);
    let json = get_json(&pool, &admin_token, &format!("/api/v1/projects/{project_id}/progress")).await;
    assert_eq!(json["complete"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn progress_is_shared_across_members_in_a_collaborative_project(pool: PgPool) {
    let (_, admin_token) = create_user(&pool, "admin", true, false).await;
    let (annotator, annotator_token) = create_user(&pool, "ann", false, false).await;
    let project_id = new_project(&pool, &admin_token, true).await;
    add_member(&pool, &admin_token, project_id, annotator.id, "annotator").await;
    let ids = examples(&pool, &admin_token, project_id, 6).await;

    toggle(&pool, &admin_token, project_id, ids[0], None).await;
    toggle(&pool, &admin_token, project_id, ids[1], None).await;
    toggle(&pool, &annotator_token, project_id, ids[2], None).await;

    let uri = format!("/api/v1/projects/{project_id}/progress");
    let admin_view = get_json(&pool, &admin_token, &uri).await;
    let annotator_view = get_json(&pool, &annotator_token, &uri).await;
    assert_eq!(admin_view, json!({ "total": 6, "complete": 3, "remaining": 3 }));
    assert_eq!(annotator_view, admin_view);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn members_progress_is_per_member_otherwise(pool: PgPool) {
    let (admin, admin_token) = create_user(&pool, "admin", true, false).await;
    let (bob, bob_token) = create_user(&pool, "bob", false, false).await;
    let project_id = new_project(&pool, &admin_token, false).await;
    add_member(&pool, &admin_token, project_id, bob.id, "annotator").await;
    let ids = examples(&pool, &admin_token, project_id, 3).await;

    toggle(&pool, &bob_token, project_id, ids[0], None).await;
    toggle(&pool, &bob_token, project_id, ids[1], None).await;

    let json = get_json(
        &pool,
        &admin_token,
        &format!("/api/v1/projects/{project_id}/members-progress"),
    )
    .await;
    assert_eq!(
        json["progress"],
        json!([
            { "user_id": admin.id, "username": "admin", "total": 3, "complete": 0, "remaining": 3 },
            { "user_id": bob.id, "username": "bob", "total": 3, "complete": 2, "remaining": 1 },
        ])
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn span_distribution_is_zero_filled(pool: PgPool) {
    let (_, admin_token) = create_user(&pool, "admin", true, false).await;
    let (bob, bob_token) = create_user(&pool, "bob", false, false).await;
    let project_id = new_project(&pool, &admin_token, false).await;
    add_member(&pool, &admin_token, project_id, bob.id, "annotator").await;
    let per = label_type(&pool, &admin_token, project_id, "span", "PER").await;
    label_type(&pool, &admin_token, project_id, "span", "LOC").await;
    let ids = examples(&pool, &admin_token, project_id, 2).await;

    for (example_id, start, end) in [(ids[0], 0, 7), (ids[1], 0, 7)] {
        let response = label(
            &pool,
            &bob_token,
            project_id,
            example_id,
            "spans",
            json!({ "label_type_id": per, "start_offset": start, "end_offset": end }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let uri = format!("/api/v1/projects/{project_id}/span-distribution");
    let json = get_json(&pool, &admin_token, &uri).await;
    assert_eq!(
        json,
        json!({
            "LOC": { "admin": 0, "bob": 0 },
            "PER": { "admin": 0, "bob": 2 },
        })
    );

    let json = get_json(&pool, &admin_token, &format!("{uri}?example={}", ids[0])).await;
    assert_eq!(json["PER"]["bob"], 1);

    let json = get_json(
        &pool,
        &admin_token,
        &format!("/api/v1/projects/{project_id}/category-distribution"),
    )
    .await;
    assert_eq!(json, json!({}));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn distribution_for_foreign_example_is_404(pool: PgPool) {
    let (_, token) = create_user(&pool, "admin", true, false).await;
    let project_id = new_project(&pool, &token, false).await;
    let other = new_project(&pool, &token, false).await;
    let foreign = examples(&pool, &token, other, 1).await;

    let response = get_auth(
        build_test_app(pool),
        &format!(
            "/api/v1/projects/{project_id}/category-distribution?example={}",
            foreign[0]
        ),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn member_label_choices_lists_every_member(pool: PgPool) {
    let (_, admin_token) = create_user(&pool, "admin", true, false).await;
    let (bob, bob_token) = create_user(&pool, "bob", false, false).await;
    let (carol, _) = create_user(&pool, "carol", false, false).await;
    let project_id = new_project(&pool, &admin_token, false).await;
    add_member(&pool, &admin_token, project_id, bob.id, "annotator").await;
    add_member(&pool, &admin_token, project_id, carol.id, "annotation_approver").await;
    let positive = label_type(&pool, &admin_token, project_id, "category", "positive").await;
    let ids = examples(&pool, &admin_token, project_id, 2).await;

    toggle(&pool, &bob_token, project_id, ids[0], Some(positive)).await;
    toggle(&pool, &admin_token, project_id, ids[1], None).await;

    let json = get_json(
        &pool,
        &admin_token,
        &format!("/api/v1/projects/{project_id}/member-label-choices"),
    )
    .await;

    let mut expected = serde_json::Map::new();
    expected.insert("admin".into(), json!({ (ids[1].to_string()): "No label" }));
    expected.insert("bob".into(), json!({ (ids[0].to_string()): "positive" }));
    expected.insert("carol".into(), json!({}));
    assert_eq!(json, serde_json::Value::Object(expected));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn toggle_rejects_foreign_label_type(pool: PgPool) {
    let (_, token) = create_user(&pool, "admin", true, false).await;
    let project_id = new_project(&pool, &token, false).await;
    let other = new_project(&pool, &token, false).await;
    let foreign = label_type(&pool, &token, other, "category", "x").await;
    let ids = examples(&pool, &token, project_id, 1).await;

    let response = post_json_auth(
        build_test_app(pool),
        &format!("/api/v1/projects/{project_id}/examples/{}/states", ids[0]),
        &token,
        json!({ "label_type_id": foreign }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn example_states_list_every_members_confirmation(pool: PgPool) {
    let (admin, admin_token) = create_user(&pool, "admin", true, false).await;
    let (bob, bob_token) = create_user(&pool, "bob", false, false).await;
    let project_id = new_project(&pool, &admin_token, false).await;
    add_member(&pool, &admin_token, project_id, bob.id, "annotator").await;
    let positive = label_type(&pool, &admin_token, project_id, "category", "positive").await;
    let ids = examples(&pool, &admin_token, project_id, 2).await;

    toggle(&pool, &admin_token, project_id, ids[0], None).await;
    toggle(&pool, &bob_token, project_id, ids[0], Some(positive)).await;
    toggle(&pool, &bob_token, project_id, ids[1], None).await;

    let json = get_json(
        &pool,
        &bob_token,
        &format!("/api/v1/projects/{project_id}/examples/{}/states", ids[0]),
    )
    .await;
    let states = json["data"].as_array().unwrap();
    assert_eq!(states.len(), 2);
    assert_eq!(states[0]["confirmed_by"], admin.id);
    assert_eq!(states[0]["label_type_id"], serde_json::Value::Null);
    assert_eq!(states[1]["confirmed_by"], bob.id);
    assert_eq!(states[1]["label_type_id"], positive);
    assert!(states.iter().all(|s| s["example_id"] == ids[0]));

    let other = new_project(&pool, &admin_token, false).await;
    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/projects/{other}/examples/{}/states", ids[0]),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn annotations_report_attaches_labels_and_shares(pool: PgPool) {
    let (_, token) = create_user(&pool, "admin", true, false).await;
    let project_id = new_project(&pool, &token, false).await;
    let per = label_type(&pool, &token, project_id, "span", "PER").await;
    let loc = label_type(&pool, &token, project_id, "span", "LOC").await;
    label_type(&pool, &token, project_id, "category", "news").await;
    let ids = examples(&pool, &token, project_id, 2).await;

    for (lt, start, end) in [(per, 0, 7), (per, 8, 14), (loc, 26, 31)] {
        let response = label(
            &pool,
            &token,
            project_id,
            ids[0],
            "spans",
            json!({ "label_type_id": lt, "start_offset": start, "end_offset": end }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = get_json(
        &pool,
        &token,
        &format!("/api/v1/projects/{project_id}/annotations-report"),
    )
    .await;

    let examples = json["examples"].as_array().unwrap();
    assert_eq!(examples.len(), 2);
    assert_eq!(examples[0]["id"], ids[0]);
    assert_eq!(examples[0]["spans"].as_array().unwrap().len(), 3);
    assert_eq!(examples[0]["spans"][0]["username"], "admin");
    assert_eq!(examples[0]["spans"][0]["start_offset"], 0);
    assert!(examples[1]["spans"].as_array().unwrap().is_empty());

    let spans = json["distribution"]["spans"].as_array().unwrap();
    let per_entry = spans.iter().find(|e| e["label"] == "PER").unwrap();
    let loc_entry = spans.iter().find(|e| e["label"] == "LOC").unwrap();
    assert_eq!(per_entry["count"], 2);
    assert_eq!(per_entry["percentage"], 66.67);
    assert_eq!(loc_entry["count"], 1);
    assert_eq!(loc_entry["percentage"], 33.33);

    assert_eq!(
        json["distribution"]["categories"],
        json!([{ "label": "news", "count": 0, "percentage": 0.0 }])
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn disagreement_report_compares_annotator_pairs(pool: PgPool) {
    let (_, admin_token) = create_user(&pool, "admin", true, false).await;
    let (bob, bob_token) = create_user(&pool, "bob", false, false).await;
    let project_id = new_project(&pool, &admin_token, false).await;
    add_member(&pool, &admin_token, project_id, bob.id, "annotator").await;
    let positive = label_type(&pool, &admin_token, project_id, "category", "positive").await;
    let negative = label_type(&pool, &admin_token, project_id, "category", "negative").await;
    let ids = examples(&pool, &admin_token, project_id, 1).await;

    label(&pool, &admin_token, project_id, ids[0], "categories", json!({ "label_type_id": positive })).await;
    label(&pool, &bob_token, project_id, ids[0], "categories", json!({ "label_type_id": negative })).await;

    let json = get_json(
        &pool,
        &admin_token,
        &format!("/api/v1/projects/{project_id}/disagreement-report"),
    )
    .await;
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["example_id"], ids[0]);
    assert_eq!(items[0]["annotator1"], "admin");
    assert_eq!(items[0]["annotator2"], "bob");
    assert_eq!(items[0]["disagreement_rate"], 1.0);
    assert_eq!(items[0]["disagreement_labels"], json!(["positive"]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn disagreement_report_narrows_to_member_or_perspective(pool: PgPool) {
    let (_, admin_token) = create_user(&pool, "admin", true, false).await;
    let (bob, bob_token) = create_user(&pool, "bob", false, false).await;
    let (carol, carol_token) = create_user(&pool, "carol", false, false).await;
    let project_id = new_project(&pool, &admin_token, false).await;
    add_member(&pool, &admin_token, project_id, bob.id, "annotator").await;
    add_member(&pool, &admin_token, project_id, carol.id, "annotator").await;
    let positive = label_type(&pool, &admin_token, project_id, "category", "positive").await;
    let negative = label_type(&pool, &admin_token, project_id, "category", "negative").await;
    let ids = examples(&pool, &admin_token, project_id, 1).await;

    label(&pool, &admin_token, project_id, ids[0], "categories", json!({ "label_type_id": positive })).await;
    label(&pool, &bob_token, project_id, ids[0], "categories", json!({ "label_type_id": negative })).await;
    label(&pool, &carol_token, project_id, ids[0], "categories", json!({ "label_type_id": positive })).await;

    let base = format!("/api/v1/projects/{project_id}/disagreement-report");
    let json = get_json(&pool, &admin_token, &base).await;
    assert_eq!(json["items"].as_array().unwrap().len(), 3);

    // A single author leaves no pair to compare.
    let json = get_json(&pool, &admin_token, &format!("{base}?member={}", bob.id)).await;
    assert_eq!(json["items"], json!([]));

    let perspective = create_in_project(
        &pool,
        &admin_token,
        project_id,
        "perspectives",
        json!({ "name": "Lens" }),
    )
    .await;
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/perspectives/{perspective}/annotators"),
        &carol_token,
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = get_json(&pool, &admin_token, &format!("{base}?perspective={perspective}")).await;
    assert_eq!(json["items"], json!([]));

    let other = new_project(&pool, &admin_token, false).await;
    let foreign =
        create_in_project(&pool, &admin_token, other, "perspectives", json!({ "name": "Elsewhere" }))
            .await;
    let response = get_auth(
        build_test_app(pool),
        &format!("{base}?perspective={foreign}"),
        &admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn annotator_report_breaks_labels_down_per_member(pool: PgPool) {
    let (_, admin_token) = create_user(&pool, "admin", true, false).await;
    let (bob, bob_token) = create_user(&pool, "bob", false, false).await;
    let (carol, _) = create_user(&pool, "carol", false, false).await;
    let project_id = new_project(&pool, &admin_token, false).await;
    add_member(&pool, &admin_token, project_id, bob.id, "annotator").await;
    add_member(&pool, &admin_token, project_id, carol.id, "annotator").await;
    let positive = label_type(&pool, &admin_token, project_id, "category", "positive").await;
    let negative = label_type(&pool, &admin_token, project_id, "category", "negative").await;
    let ids = examples(&pool, &admin_token, project_id, 2).await;

    label(&pool, &bob_token, project_id, ids[0], "categories", json!({ "label_type_id": positive })).await;
    label(&pool, &bob_token, project_id, ids[0], "categories", json!({ "label_type_id": negative })).await;
    label(&pool, &bob_token, project_id, ids[1], "categories", json!({ "label_type_id": positive })).await;
    label(&pool, &admin_token, project_id, ids[1], "categories", json!({ "label_type_id": negative })).await;

    let base = format!("/api/v1/projects/{project_id}/annotator-report");
    let json = get_json(&pool, &admin_token, &base).await;
    let items = json["items"].as_array().unwrap();
    let names: Vec<&str> = items.iter().map(|i| i["annotator"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["admin", "bob", "carol"]);

    assert_eq!(items[0]["total"], 1);
    assert_eq!(items[0]["categories"], "negative");
    assert_eq!(
        items[1],
        json!({
            "annotator": "bob",
            "total": 3,
            "categories": "positive, negative",
            "datasets": [
                {
                    "document": ids[0],
                    "categories": [
                        { "name": "positive", "count": 1, "percentage": 50.0 },
                        { "name": "negative", "count": 1, "percentage": 50.0 },
                    ],
                },
                {
                    "document": ids[1],
                    "categories": [{ "name": "positive", "count": 1, "percentage": 100.0 }],
                },
            ],
        })
    );
    assert_eq!(
        items[2],
        json!({ "annotator": "carol", "total": 0, "categories": "", "datasets": [] })
    );

    // Filters narrow the labels counted, never the member list.
    let json = get_json(&pool, &admin_token, &format!("{base}?member={}", bob.id)).await;
    let totals: Vec<i64> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["total"].as_i64().unwrap())
        .collect();
    assert_eq!(totals, vec![0, 3, 0]);

    let perspective = create_in_project(
        &pool,
        &admin_token,
        project_id,
        "perspectives",
        json!({ "name": "Lens" }),
    )
    .await;
    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/perspectives/{perspective}/annotators"),
        &admin_token,
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = get_json(&pool, &admin_token, &format!("{base}?perspective={perspective}")).await;
    let totals: Vec<i64> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["total"].as_i64().unwrap())
        .collect();
    assert_eq!(totals, vec![1, 0, 0]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_member_cannot_read_statistics(pool: PgPool) {
    let (_, admin_token) = create_user(&pool, "admin", true, false).await;
    let (_, outsider_token) = create_user(&pool, "outsider", false, false).await;
    let project_id = new_project(&pool, &admin_token, false).await;

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/projects/{project_id}/progress"),
        &outsider_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
