//! A local HTTP server answering every request with canned replies.

use crate::api::OfferAPI;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const OFFERS: &str = include_str!("response/fixtures/offers.json");

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body: body.into(),
        }
    }
    
    pub fn html(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/html",
            body: body.into(),
        }
    }
}

/// Answers requests with `replies` in order. The last reply repeats. Returns the URL to fetch.
pub async fn serve(replies: Vec<Reply>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    
    tokio::spawn(async move {
        let mut count = 0;
        
        while let Ok((mut stream, _)) = listener.accept().await {
            let reply = replies[count.min(replies.len() - 1)].clone();
            
            count += 1;
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buffer = [0u8; 1024];
                
                // The request has no body, so the headers are everything.
                while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                    match stream.read(&mut buffer).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buffer[..n]),
                    }
                }
                
                let response = format!(
                    "HTTP/1.1 {} Status\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    reply.status,
                    reply.content_type,
                    reply.body.len(),
                    reply.body,
                );
                
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });
    
    format!("http://{address}/api/dupe")
}

/// Serves the offer fixture to every request.
pub async fn serve_offers() -> String {
    serve(vec![Reply::json(OFFERS)]).await
}

/// Talks to the local server directly, whatever proxy the environment sets.
pub fn local_api(url: &str) -> OfferAPI {
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(std::time::Duration::from_secs(2))
        .build()
        .unwrap();
    
    OfferAPI::builder()
        .url(url)
        .client(reqwest_middleware::ClientBuilder::new(client).build())
        .build()
        .unwrap()
}
