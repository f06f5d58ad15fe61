//! # notebox 서버 진입점
//!
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성과 마이그레이션
//! 4. API 라우터 설정 후 HTTP 서버 시작
//!
//! 로컬 개발용으로 `notebox issue-token <표시 이름>` 서브커맨드도 제공합니다.
//! 외부 인증 서버 없이 API를 호출해 볼 수 있도록 새 사용자 ID로 토큰을 찍어 줍니다.

use anyhow::{bail, Result};
use notebox::{config::Config, db, middleware::auth::create_access_token, routes::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    let mut args = std::env::args().skip(1);
    if let Some(command) = args.next() {
        return match command.as_str() {
            "issue-token" => issue_token(args.collect::<Vec<_>>().join(" ")),
            other => bail!("unknown command: {other} (usage: notebox [issue-token <display name>])"),
        };
    }

    // RUST_LOG가 없으면 notebox, tower_http, axum 모듈을 debug 레벨로
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notebox=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Starting notebox server on {}", config.bind_addr());

    let pool = db::connect(&config.database_url, config.db_max_connections).await?;

    tracing::info!("Running database migrations...");
    db::migrate(&pool).await?;

    let state = AppState {
        pool,
        jwt_secret: config.jwt_secret.clone(),
    };
    let app = notebox::app(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// 새 UUIDv7 사용자 ID로 액세스 토큰을 발급해 표준 출력에 씁니다.
fn issue_token(display_name: String) -> Result<()> {
    if display_name.trim().is_empty() {
        bail!("usage: notebox issue-token <display name>");
    }

    let secret = std::env::var("JWT_SECRET")?;
    let user_id = uuid::Uuid::now_v7().to_string();
    let token = create_access_token(&user_id, display_name.trim(), &secret)?;

    println!("user_id: {user_id}");
    println!("token:   {token}");
    Ok(())
}
