//! English strings for the localisation keys the backend and the client emit.

const EN: &[(&str, &str)] = &[
    ("form.username", "Username"),
    ("form.password", "Password"),
    ("form.login", "Login"),
    ("form.logout", "Logout"),
    ("nav.dropdown", "Dropdown"),
    ("nav.home", "Home"),
    ("auth.invalid", "Invalid username or password"),
    ("auth.too_many", "Too many attempt"),
    ("auth.need_reset", "You need to reset your password"),
    ("auth.success", "Logged in"),
    ("auth.logout", "Logged out"),
    ("auth.expired", "Session expired, please log in again"),
    ("server.unreachable", "Could not reach the server"),
    ("request.rejected", "The server rejected the request"),
    ("_", "This is a bug, please report"),
];

/// English text for `key`, or the key itself when there is none.
pub fn translate(key: &str) -> &str {
    EN.iter()
        .find(|(k, _)| *k == key)
        .map(|(_, text)| *text)
        .unwrap_or(key)
}
