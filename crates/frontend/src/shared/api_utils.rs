//! Where the order feed lives.

/// Port the order feed service listens on (`[server] port` in its config).
const FEED_PORT: u16 = 3000;

/// Order feed origin: the page's own scheme and host on the feed port,
/// e.g. `http://localhost:3000`. Empty outside a browser, which leaves
/// request paths relative.
pub fn api_base() -> String {
    let Some(window) = web_sys::window() else {
        return String::new();
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    feed_origin(&protocol, &hostname)
}

/// Full URL of a feed endpoint such as `ORDERS_PATH`.
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

fn feed_origin(protocol: &str, hostname: &str) -> String {
    format!("{}//{}:{}", protocol, hostname, FEED_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_origin_keeps_page_scheme_and_host() {
        assert_eq!(feed_origin("https:", "pedidos.example.com"), "https://pedidos.example.com:3000");
        assert_eq!(feed_origin("http:", "localhost"), "http://localhost:3000");
    }
}
