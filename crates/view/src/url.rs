//! Path helpers shared by modules and the shell.

pub fn account(path: &str) -> String {
    format!("/account/{}", path.trim_start_matches('/'))
}

pub fn user(id: &str) -> String {
    format!("/u/{id}/")
}

pub fn root(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    #[test]
    fn builds_paths() {
        assert_eq!(super::account("comments/"), "/account/comments/");
        assert_eq!(super::account("/likes/"), "/account/likes/");
        assert_eq!(super::user("3"), "/u/3/");
        assert_eq!(super::root("submit/"), "/submit/");
    }
}
