//! Host engine collaborators.

/// What the bridge needs from the game engine hosting it.
///
/// Closures work directly:
///
/// ```rust
/// use handoff::SceneHost;
///
/// let mut loaded = Vec::new();
/// let mut host = |name: &str| loaded.push(name.to_string());
/// host.load_scene("lobby");
/// assert_eq!(loaded, ["lobby"]);
/// ```
pub trait SceneHost {
    /// Asks the engine to switch to the named scene.
    fn load_scene(&mut self, name: &str);
}

impl<F: FnMut(&str)> SceneHost for F {
    fn load_scene(&mut self, name: &str) {
        self(name)
    }
}
