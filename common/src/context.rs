use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// A cancellation scope shared by every task of the process.
///
/// Each clone keeps the scope alive, so [`Handler::cancel`] only resolves once
/// every task has observed the cancellation and dropped its context.
#[derive(Clone)]
pub struct Context {
	token: CancellationToken,
	_guard: mpsc::Sender<()>,
}

pub struct Handler {
	token: CancellationToken,
	guard: mpsc::Receiver<()>,
}

impl Context {
	#[must_use]
	pub fn new() -> (Self, Handler) {
		let (sender, receiver) = mpsc::channel(1);
		let token = CancellationToken::new();

		(
			Self {
				token: token.clone(),
				_guard: sender,
			},
			Handler {
				token,
				guard: receiver,
			},
		)
	}

	pub async fn done(&self) {
		self.token.cancelled().await
	}

	pub fn is_done(&self) -> bool {
		self.token.is_cancelled()
	}
}

impl Handler {
	/// Waits until every context has been dropped.
	pub async fn done(&mut self) {
		while self.guard.recv().await.is_some() {}
	}

	pub async fn cancel(mut self) {
		self.token.cancel();
		self.done().await;
	}
}
