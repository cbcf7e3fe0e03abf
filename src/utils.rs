/// Escape one cache key component into a filesystem-safe string.
///
/// Bytes outside [A-Za-z0-9.-] are written as %XX, so two distinct
/// components can never escape to the same string and '_' stays free to
/// act as a separator between components.
pub fn escape_component(component: &str) -> String {
    let mut escaped = String::with_capacity(component.len());
    for byte in component.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'.' | b'-' => {
                escaped.push(byte as char);
            }
            _ => {
                escaped.push('%');
                escaped.push_str(&format!("{byte:02X}"));
            }
        }
    }
    escaped
}
