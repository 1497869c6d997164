use std::net::Ipv4Addr;

/// Checks an IPv4 address against a test address, optionally carrying a
/// prefix mask in `a.b.c.d/mask` form.
///
/// Malformed input yields `false`, never an error; a mask is honored only
/// on the test address. A `/0` mask degenerates to a full-address
/// comparison, it does not match everything.
pub fn matches_ipv4(ip: &str, test: &str) -> bool {
    let (test_base, mask) = match test.split_once('/') {
        Some((base, mask)) => match mask.parse::<u32>() {
            Ok(mask) if mask <= 32 => (base, mask),
            _ => return false,
        },
        None => (test, 32),
    };
    let ip_base = ip.split('/').next().unwrap_or(ip);

    let (Ok(test_addr), Ok(ip_addr)) = (
        test_base.parse::<Ipv4Addr>(),
        ip_base.parse::<Ipv4Addr>(),
    ) else {
        return false;
    };

    let shift = if mask == 0 { 0 } else { 32 - mask };
    u32::from(test_addr) >> shift == u32::from(ip_addr) >> shift
}
