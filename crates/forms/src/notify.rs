/// Fire-and-forget notifications to the external UI layer.
///
/// Violations carry a title + message pair (the UI renders them as a warning
/// dialog); success messages are plain toasts.
pub trait Notifier {
    fn violation(&self, title: &str, message: &str);

    fn success(&self, message: &str);
}
