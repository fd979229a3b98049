//! XML-RPC client for Odoo 17/18/19

use std::sync::OnceLock;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};

use super::codec::{decode_response, encode_call};
use super::{OdooConnection, Record};
use crate::core::{BoostError, BoostResult};

/// One XML-RPC service URL plus the HTTP client used to reach it
#[derive(Debug)]
struct RpcEndpoint {
    url: String,
    client: Client,
}

impl RpcEndpoint {
    async fn call(&self, method: &str, params: &[Value]) -> BoostResult<Value> {
        tracing::debug!("[XmlRpc] {} -> {}", method, self.url);

        let body = encode_call(method, params);
        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "text/xml")
            .body(body)
            .send()
            .await?
            .error_for_status()?;

        let text = response.text().await?;
        decode_response(&text)
    }
}

/// Connects to Odoo via XML-RPC (works on all supported versions)
///
/// The HTTP client and the `common` and `object` endpoints are created on
/// first use and reused afterwards. Both endpoints share one pooled client.
#[derive(Debug)]
pub struct XmlRpcConnection {
    url: String,
    database: String,
    username: String,
    password: String,
    client: OnceLock<Client>,
    uid: OnceLock<i64>,
    common: OnceLock<RpcEndpoint>,
    object: OnceLock<RpcEndpoint>,
}

impl XmlRpcConnection {
    pub fn new(
        url: impl Into<String>,
        database: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let url: String = url.into();
        Self {
            url: url.trim_end_matches('/').to_string(),
            database: database.into(),
            username: username.into(),
            password: password.into(),
            client: OnceLock::new(),
            uid: OnceLock::new(),
            common: OnceLock::new(),
            object: OnceLock::new(),
        }
    }

    /// Base URL with any trailing slash removed
    pub fn url(&self) -> &str {
        &self.url
    }

    fn http_client(&self) -> Client {
        self.client.get_or_init(Client::new).clone()
    }

    fn common(&self) -> &RpcEndpoint {
        self.common.get_or_init(|| RpcEndpoint {
            url: format!("{}/xmlrpc/2/common", self.url),
            client: self.http_client(),
        })
    }

    fn object(&self) -> &RpcEndpoint {
        self.object.get_or_init(|| RpcEndpoint {
            url: format!("{}/xmlrpc/2/object", self.url),
            client: self.http_client(),
        })
    }
}

/// Map faults that mean "model not in the registry" to `ModelNotFound`
fn classify_fault(model: &str, err: BoostError) -> BoostError {
    match err {
        BoostError::Fault { message, .. }
            if message.contains(&format!("Object {} doesn't exist", model))
                || message.contains(&format!("KeyError: '{}'", model)) =>
        {
            BoostError::ModelNotFound(model.to_string())
        }
        other => other,
    }
}

#[async_trait]
impl OdooConnection for XmlRpcConnection {
    async fn authenticate(&self) -> BoostResult<i64> {
        let result = self
            .common()
            .call(
                "authenticate",
                &[
                    Value::from(self.database.clone()),
                    Value::from(self.username.clone()),
                    Value::from(self.password.clone()),
                    Value::Object(Map::new()),
                ],
            )
            .await?;

        // Odoo answers `false` on bad credentials
        let uid = result.as_i64().filter(|uid| *uid > 0).ok_or_else(|| {
            BoostError::Authentication {
                username: self.username.clone(),
                database: self.database.clone(),
            }
        })?;

        let stored = *self.uid.get_or_init(|| uid);
        tracing::info!(
            "[XmlRpc] Authenticated {}@{} as uid {}",
            self.username,
            self.database,
            stored
        );
        Ok(stored)
    }

    fn uid(&self) -> BoostResult<i64> {
        self.uid.get().copied().ok_or(BoostError::NotAuthenticated)
    }

    async fn execute(
        &self,
        model: &str,
        method: &str,
        args: Vec<Value>,
        kwargs: Map<String, Value>,
    ) -> BoostResult<Value> {
        let uid = self.uid()?;
        let params = [
            Value::from(self.database.clone()),
            Value::from(uid),
            Value::from(self.password.clone()),
            Value::from(model),
            Value::from(method),
            Value::Array(args),
            Value::Object(kwargs),
        ];
        self.object()
            .call("execute_kw", &params)
            .await
            .map_err(|e| classify_fault(model, e))
    }

    async fn get_version(&self) -> BoostResult<Record> {
        match self.common().call("version", &[]).await? {
            Value::Object(map) => Ok(map),
            other => Err(BoostError::Protocol(format!(
                "version() returned {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{Domain, ReadOptions};
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[derive(Debug, Clone)]
    struct Captured {
        path: String,
        body: String,
    }

    /// Serve the canned XML bodies in order, one per connection
    async fn spawn_server(responses: Vec<String>) -> (String, Arc<Mutex<Vec<Captured>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = captured.clone();

        tokio::spawn(async move {
            for body in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let request = read_request(&mut socket).await;
                sink.lock().unwrap().push(request);

                let reply = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: text/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                socket.write_all(reply.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            }
        });

        (format!("http://{}", addr), captured)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> Captured {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "client closed before sending headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let path = head
            .lines()
            .next()
            .and_then(|line| line.split_whitespace().nth(1))
            .unwrap_or_default()
            .to_string();
        let length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);

        while buf.len() < header_end + length {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        Captured {
            path,
            body: String::from_utf8_lossy(&buf[header_end..]).to_string(),
        }
    }

    fn ok(value_xml: &str) -> String {
        format!(
            "<?xml version='1.0'?><methodResponse><params><param><value>{}</value></param></params></methodResponse>",
            value_xml
        )
    }

    fn fault(message: &str) -> String {
        format!(
            "<?xml version='1.0'?><methodResponse><fault><value><struct>\
             <member><name>faultCode</name><value><int>1</int></value></member>\
             <member><name>faultString</name><value><string>{}</string></value></member>\
             </struct></value></fault></methodResponse>",
            message
        )
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let conn = XmlRpcConnection::new("http://localhost:8069/", "db", "admin", "admin");
        assert_eq!(conn.url(), "http://localhost:8069");
        assert_eq!(conn.common().url, "http://localhost:8069/xmlrpc/2/common");
        assert_eq!(conn.object().url, "http://localhost:8069/xmlrpc/2/object");
    }

    #[test]
    fn test_endpoints_are_reused() {
        let conn = XmlRpcConnection::new("http://localhost:8069", "db", "admin", "admin");
        assert!(std::ptr::eq(conn.common(), conn.common()));
        assert!(std::ptr::eq(conn.object(), conn.object()));
    }

    #[test]
    fn test_client_created_on_first_use() {
        let conn = XmlRpcConnection::new("http://localhost:8069", "db", "admin", "admin");
        assert!(conn.client.get().is_none());
        assert!(conn.common.get().is_none());
        assert!(conn.object.get().is_none());

        conn.common();
        assert!(conn.client.get().is_some());
        assert!(conn.object.get().is_none());
    }

    #[tokio::test]
    async fn test_uid_before_authenticate() {
        let conn = XmlRpcConnection::new("http://localhost:8069", "db", "admin", "admin");
        assert!(matches!(conn.uid(), Err(BoostError::NotAuthenticated)));

        let err = conn
            .execute("res.partner", "read", vec![], Map::new())
            .await
            .unwrap_err();
        assert!(matches!(err, BoostError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let (url, captured) = spawn_server(vec![ok("<int>2</int>")]).await;
        let conn = XmlRpcConnection::new(url, "testdb", "admin", "secret");

        assert_eq!(conn.authenticate().await.unwrap(), 2);
        assert_eq!(conn.uid().unwrap(), 2);

        let requests = captured.lock().unwrap().clone();
        assert_eq!(requests[0].path, "/xmlrpc/2/common");
        assert!(requests[0].body.contains("<methodName>authenticate</methodName>"));
        assert!(requests[0].body.contains("<string>testdb</string>"));
        assert!(requests[0].body.contains("<string>secret</string>"));
        assert!(requests[0].body.contains("<struct></struct>"));
    }

    #[tokio::test]
    async fn test_authenticate_failure() {
        let (url, _) = spawn_server(vec![ok("<boolean>0</boolean>")]).await;
        let conn = XmlRpcConnection::new(url, "prod", "bob", "wrong");

        let err = conn.authenticate().await.unwrap_err();
        assert_eq!(err.to_string(), "Authentication failed for bob@prod");
        assert!(conn.uid().is_err());
    }

    #[tokio::test]
    async fn test_search_read_sends_execute_kw() {
        let (url, captured) = spawn_server(vec![
            ok("<int>7</int>"),
            ok("<array><data><value><struct>\
                <member><name>id</name><value><int>1</int></value></member>\
                <member><name>name</name><value><string>Azure</string></value></member>\
                </struct></value></data></array>"),
        ])
        .await;
        let conn = XmlRpcConnection::new(url, "testdb", "admin", "admin");
        conn.authenticate().await.unwrap();

        let records = conn
            .search_read(
                "res.partner",
                &Domain::new().with("is_company", "=", true),
                &ReadOptions::new().fields(["name"]).limit(5),
            )
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], "Azure");

        let requests = captured.lock().unwrap().clone();
        let call = &requests[1];
        assert_eq!(call.path, "/xmlrpc/2/object");
        assert!(call.body.contains("<methodName>execute_kw</methodName>"));
        assert!(call.body.contains("<value><int>7</int></value>"));
        assert!(call.body.contains("<string>res.partner</string>"));
        assert!(call.body.contains("<string>search_read</string>"));
        assert!(call.body.contains("<name>limit</name><value><int>5</int></value>"));
        assert!(call.body.contains("<name>offset</name><value><int>0</int></value>"));
    }

    #[tokio::test]
    async fn test_missing_model_fault() {
        let (url, _) = spawn_server(vec![
            ok("<int>2</int>"),
            fault("Traceback ... KeyError: 'website.page'"),
            fault("Object x.y doesn't exist"),
            fault("ValueError: Invalid field 'foo'"),
        ])
        .await;
        let conn = XmlRpcConnection::new(url, "testdb", "admin", "admin");
        conn.authenticate().await.unwrap();

        let err = conn
            .search_count("website.page", &Domain::new())
            .await
            .unwrap_err();
        assert!(err.is_missing_model());

        let err = conn.search_count("x.y", &Domain::new()).await.unwrap_err();
        assert!(matches!(err, BoostError::ModelNotFound(ref m) if m == "x.y"));

        let err = conn
            .search_count("res.partner", &Domain::new())
            .await
            .unwrap_err();
        assert!(matches!(err, BoostError::Fault { .. }));
    }

    #[tokio::test]
    async fn test_get_version() {
        let (url, captured) = spawn_server(vec![ok(
            "<struct><member><name>server_version</name><value><string>18.0</string></value></member></struct>",
        )])
        .await;
        let conn = XmlRpcConnection::new(url, "testdb", "admin", "admin");

        let version = conn.get_version().await.unwrap();
        assert_eq!(version["server_version"], "18.0");
        assert!(captured.lock().unwrap()[0]
            .body
            .contains("<methodName>version</methodName>"));
    }
}
