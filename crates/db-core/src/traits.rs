/// Piste son jouée au démarrage de la démo.
///
/// Implémenté par : `TrackPlayer` (db-audio). Toute erreur est non fatale :
/// l'appelant la journalise et continue sans son.
///
/// # Example
/// ```
/// use db_core::traits::Soundtrack;
///
/// struct Silence;
/// impl Soundtrack for Silence {
///     fn play_from_start(&mut self) -> anyhow::Result<()> { Ok(()) }
///     fn stop(&mut self) {}
/// }
/// ```
pub trait Soundtrack: Send {
    /// Rembobine et lance la lecture.
    ///
    /// # Errors
    /// Returns an error if the playback backend rejects the request.
    fn play_from_start(&mut self) -> anyhow::Result<()>;

    /// Coupe la lecture. Idempotent.
    fn stop(&mut self);
}
