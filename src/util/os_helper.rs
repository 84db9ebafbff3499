/// Author for new posts: the real name of the OS user, or the login when the
/// real name is not set.
pub fn default_author() -> String {
    let name = whoami::realname();
    if name.trim().is_empty() {
        return whoami::username();
    }
    name
}
