use std::net::SocketAddr;
use std::sync::Arc;

use configs::{AppConfig, DatabaseSettings};
use reqwest::StatusCode;
use serde_json::{json, Value};
use service::DbHandle;
use tokio::net::TcpListener;

use server::{startup, AppState};

struct TestApp {
    base_url: String,
    client: reqwest::Client,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    cfg.server.static_dir = None;
    cfg.database = DatabaseSettings {
        url: Some("sqlite::memory:".into()),
        max_connections: 1,
        min_connections: 1,
        ..Default::default()
    };

    let handle = Arc::new(DbHandle::new(cfg.database.clone()));
    anyhow::ensure!(startup::provision(&handle).await, "provisioning failed");
    let app = startup::build_app(&cfg, AppState::from_handle(handle)).await;

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url: format!("http://{}", addr), client: reqwest::Client::new() })
}

#[tokio::test]
async fn e2e_suivi_crud_over_sqlite() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = &app.client;
    let base = &app.base_url;

    let res = c.get(format!("{base}/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"status": "ok"}));

    let created: Value = c
        .post(format!("{base}/ajouter"))
        .json(&json!({"date": "2024-03-05", "heure_debut": "16:30", "heure_fin": "18:45", "km": 12}))
        .send()
        .await?
        .json()
        .await?;
    let id = created["id"].as_i64().expect("id");

    c.post(format!("{base}/ajouter"))
        .json(&json!({"date": "2024-02-01", "heure_debut": "08:00:00", "heure_fin": "09:15:00", "km": 3.0}))
        .send()
        .await?
        .error_for_status()?;

    let rows: Vec<Value> = c.get(format!("{base}/donnees")).send().await?.json().await?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["date"], "2024-02-01");
    assert_eq!(rows[0]["heure_debut"], "08:00");
    assert_eq!(rows[0]["duree"], 75);
    assert_eq!(rows[1]["id"].as_i64(), Some(id));

    let res = c
        .put(format!("{base}/modifier/{id}"))
        .json(&json!({"date": "2024-03-05", "heure_debut": "16:30", "heure_fin": "17:00", "km": 12}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let rec: Value = c.get(format!("{base}/donnees/{id}")).send().await?.json().await?;
    assert_eq!(rec["duree"], 30);

    let res = c.delete(format!("{base}/supprimer/{id}")).send().await?;
    assert_eq!(res.json::<Value>().await?, json!({"success": true}));
    let res = c.delete(format!("{base}/supprimer/{id}")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let totals: Value = c.get(format!("{base}/totaux")).send().await?.json().await?;
    assert_eq!(totals, json!({"count": 1, "duree": 75, "km": 3}));
    Ok(())
}

#[tokio::test]
async fn e2e_cors_preflight_is_allowed() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = app
        .client
        .request(reqwest::Method::OPTIONS, format!("{}/ajouter", app.base_url))
        .header("Origin", "http://example.test")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await?;
    assert!(res.status().is_success());
    assert!(res.headers().contains_key("access-control-allow-origin"));
    Ok(())
}
