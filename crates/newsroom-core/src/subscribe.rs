//! Newsletter subscription link

/// Subject line of a subscription request
pub const SUBJECT: &str = "Newsletter subscription";

/// Body template of a subscription request
pub const BODY: &str = "Please write your name and student ID/department";

/// `mailto:` link that opens a subscription request to `email`
pub fn subscribe_link(email: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        email.trim(),
        percent_encode(SUBJECT),
        percent_encode(BODY)
    )
}

/// Percent-encode everything outside the URI unreserved set (plus `/`)
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_link() {
        assert_eq!(
            subscribe_link("editor@example.com"),
            "mailto:editor@example.com?subject=Newsletter%20subscription\
             &body=Please%20write%20your%20name%20and%20student%20ID/department"
        );
    }

    #[test]
    fn test_percent_encode_multibyte() {
        assert_eq!(percent_encode("é&="), "%C3%A9%26%3D");
    }
}
