/// `search` command: validate flags, call the search endpoint, render results.
use std::time::Duration;

use tracing::debug;

use crate::atlas::{AtlasError, BoardgameAtlas, CallContext};
use crate::cli::Cli;
use crate::cli::OutputCtx;
use crate::cli::output::write_search_result;

/// Validated search parameters, borrowed from the parsed CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams<'a> {
    pub query: &'a str,
    pub client_id: &'a str,
    pub limit: u64,
    pub skip: u64,
    pub timeout: Duration,
}

impl<'a> SearchParams<'a> {
    /// Check that `--query` and `--clientId` are present and not blank.
    ///
    /// # Errors
    ///
    /// Returns `MissingArgument` naming the first offending flag.
    pub fn from_cli(cli: &'a Cli) -> Result<Self, AtlasError> {
        let query = require(
            cli.query.as_deref(),
            "query",
            "the boardgame name to search",
        )?;
        let client_id = require(
            cli.client_id.as_deref(),
            "clientId",
            "your Boardgame Atlas client_id",
        )?;
        Ok(Self {
            query,
            client_id,
            limit: cli.limit,
            skip: cli.skip,
            timeout: Duration::from_secs(cli.timeout),
        })
    }
}

fn require<'a>(
    value: Option<&'a str>,
    flag: &'static str,
    what: &'static str,
) -> Result<&'a str, AtlasError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AtlasError::MissingArgument { flag, what }),
    }
}

/// Run a search.
///
/// Validation happens before the client is built, so a missing flag never
/// reaches the network.
///
/// # Errors
///
/// Returns `AtlasError` on missing flags or any search failure.
pub async fn run(cli: &Cli, ctx: &OutputCtx) -> Result<(), AtlasError> {
    let params = SearchParams::from_cli(cli)?;
    debug!(
        query = params.query,
        limit = params.limit,
        skip = params.skip,
        timeout_secs = params.timeout.as_secs(),
        "search parameters"
    );

    let bga = BoardgameAtlas::with_endpoint(params.client_id, &cli.endpoint)?;
    let call = CallContext::with_timeout(params.timeout);

    let _t_search = ctx.timer("search");
    let result = bga
        .search(&call, params.query, params.limit, params.skip)
        .await?;
    drop(_t_search);

    write_search_result(&result, ctx);
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;
    use crate::cli::args::OutputFormat;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["boardgameatlas"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn quiet_ctx() -> OutputCtx {
        OutputCtx {
            format: OutputFormat::Id,
            no_header: false,
            styled: false,
        }
    }

    #[test]
    fn test_params_from_cli() {
        let cli = parse(&["--query", " catan ", "--clientId", "abc", "--limit", "3", "--timeout", "2"]);
        let params = SearchParams::from_cli(&cli).unwrap();
        assert_eq!(params.query, " catan ");
        assert_eq!(params.client_id, "abc");
        assert_eq!(params.limit, 3);
        assert_eq!(params.skip, 0);
        assert_eq!(params.timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_missing_query() {
        let cli = parse(&["--clientId", "abc"]);
        match SearchParams::from_cli(&cli) {
            Err(AtlasError::MissingArgument { flag, .. }) => assert_eq!(flag, "query"),
            other => panic!("expected MissingArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_client_id() {
        let cli = parse(&["--query", "catan", "--clientId", " \t "]);
        match SearchParams::from_cli(&cli) {
            Err(AtlasError::MissingArgument { flag, .. }) => assert_eq!(flag, "clientId"),
            other => panic!("expected MissingArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_query_checked_before_client_id() {
        let cli = parse(&["--query", "   "]);
        match SearchParams::from_cli(&cli) {
            Err(AtlasError::MissingArgument { flag, .. }) => assert_eq!(flag, "query"),
            other => panic!("expected MissingArgument, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blank_query_never_touches_network() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/api/search", listener.local_addr().unwrap());
        let cli = parse(&["--query", "", "--clientId", "abc", "--endpoint", &endpoint]);

        let err = run(&cli, &quiet_ctx()).await.unwrap_err();
        assert!(err.is_usage());

        let accepted =
            tokio::time::timeout(Duration::from_millis(50), listener.accept()).await;
        assert!(accepted.is_err(), "driver connected despite blank query");
    }

    #[tokio::test]
    async fn test_run_against_mock_endpoint() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/api/search", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let n = socket.read(&mut buf).await.unwrap();
            let body = r#"{"games":[{"name":"Catan"}],"count":1}"#;
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            String::from_utf8_lossy(&buf[..n]).into_owned()
        });

        let cli = parse(&[
            "--query", "catan", "--clientId", "abc", "--limit", "5", "--skip", "10", "--endpoint", &endpoint,
        ]);
        run(&cli, &quiet_ctx()).await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /api/search?name=catan&limit=5&skip=10&client_id=abc "));
    }

    #[tokio::test]
    async fn test_run_surfaces_status_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/api/search", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(b"HTTP/1.1 401 Unauthorized\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")
                .await;
        });

        let cli = parse(&["--query", "catan", "--clientId", "bad", "--endpoint", &endpoint]);
        let err = run(&cli, &quiet_ctx()).await.unwrap_err();
        assert!(matches!(err, AtlasError::Status { .. }));
        server.await.unwrap();
    }
}
