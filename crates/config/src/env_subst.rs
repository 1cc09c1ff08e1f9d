/// Replace `${ENV_VAR}` placeholders in raw config text.
///
/// Placeholders naming an unset variable stay in the output verbatim,
/// as does an unterminated `${`.
pub fn substitute_env(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let Some(end) = rest[start..].find('}') else {
            // Unterminated placeholder: keep the tail as-is.
            out.push_str(&rest[start..]);
            return out;
        };
        let placeholder = &rest[start..start + end + 1];
        let name = &placeholder[2..placeholder.len() - 1];
        // env::var rejects the empty name, so "${}" also falls through
        // to the verbatim branch.
        match std::env::var(name) {
            Ok(value) => out.push_str(&value),
            Err(_) => out.push_str(placeholder),
        }
        rest = &rest[start + end + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
#[allow(unsafe_code)] // env::set_var is unsafe in edition 2024; test-only
mod tests {
    use super::*;

    #[test]
    fn substitutes_known_var() {
        unsafe { std::env::set_var("SQUELCH_TEST_VAR", "hello") };
        assert_eq!(substitute_env("bind=${SQUELCH_TEST_VAR}"), "bind=hello");
        unsafe { std::env::remove_var("SQUELCH_TEST_VAR") };
    }

    #[test]
    fn substitutes_multiple_placeholders() {
        unsafe { std::env::set_var("SQUELCH_TEST_A", "1") };
        unsafe { std::env::set_var("SQUELCH_TEST_B", "2") };
        assert_eq!(
            substitute_env("${SQUELCH_TEST_A}:${SQUELCH_TEST_B}"),
            "1:2"
        );
        unsafe { std::env::remove_var("SQUELCH_TEST_A") };
        unsafe { std::env::remove_var("SQUELCH_TEST_B") };
    }

    #[test]
    fn leaves_unknown_var() {
        assert_eq!(
            substitute_env("${SQUELCH_NONEXISTENT_XYZ}"),
            "${SQUELCH_NONEXISTENT_XYZ}"
        );
    }

    #[test]
    fn leaves_unterminated_and_empty_placeholders() {
        assert_eq!(substitute_env("port = ${SQUELCH_"), "port = ${SQUELCH_");
        assert_eq!(substitute_env("a ${} b"), "a ${} b");
    }

    #[test]
    fn no_placeholders() {
        assert_eq!(substitute_env("plain text"), "plain text");
    }
}
