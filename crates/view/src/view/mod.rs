use quire_dom::{DomEvent, DomId, InputEvent, NativePoint, RenderTarget, Target};
use quire_model::{EditorState, Transaction};
use tracing::{debug, warn};

use crate::config::ViewConfig;
use crate::desc::ViewTree;
use crate::error::Result;
use crate::input::{self, InputOutcome};
use crate::selection;


/// An editable view of an [`EditorState`] rendered into a mount element.
///
/// The view owns its render target. Every state change reconciles the
/// rendered tree and then writes the document selection to the native
/// selection, so the two never disagree once a call returns.
pub struct EditorView<T: Target> {
	target: T,
	tree: ViewTree,
	state: EditorState,
	config: ViewConfig,
}

impl<T: Target> EditorView<T> {
	/// Renders `state` into `mount` and starts listening for selection changes.
	///
	/// `mount` must be an empty element owned by `target`.
	pub fn new(mut target: T, mount: DomId, state: EditorState, config: ViewConfig) -> Result<Self> {
		config.validate()?;
		apply_config(&mut target, mount, None, &config);
		let tree = ViewTree::mount(&mut target, mount, state.doc());
		target.listen_selection(true);

		let mut view = Self {
			target,
			tree,
			state,
			config,
		};
		selection::push(&view.tree, &mut view.target, view.state.selection())?;
		debug!(views = view.tree.len(), editable = view.config.editable, "view.new");
		Ok(view)
	}

	/// The current state.
	pub fn state(&self) -> &EditorState {
		&self.state
	}

	/// The current configuration.
	pub fn config(&self) -> &ViewConfig {
		&self.config
	}

	/// The view tree.
	pub fn tree(&self) -> &ViewTree {
		&self.tree
	}

	/// The render target.
	pub fn target(&self) -> &T {
		&self.target
	}

	/// The render target, mutably.
	///
	/// Changes to nodes the view owns are overwritten or lost on the next
	/// update.
	pub fn target_mut(&mut self) -> &mut T {
		&mut self.target
	}

	/// The mount element.
	pub fn mount(&self) -> DomId {
		self.tree.mount_dom()
	}

	/// Returns true if the view accepts input.
	pub fn is_editable(&self) -> bool {
		self.config.editable
	}

	/// Replaces the state and always rewrites the native selection.
	pub fn set_state(&mut self, state: EditorState) -> Result<()> {
		self.sync(state, true)
	}

	/// Moves to `state`, touching only what changed.
	pub fn update_state(&mut self, state: EditorState) -> Result<()> {
		self.sync(state, false)
	}

	fn sync(&mut self, state: EditorState, force_push: bool) -> Result<()> {
		let doc_changed = !state.doc().ptr_eq(self.state.doc());
		let selection_changed = state.selection() != self.state.selection();
		if doc_changed {
			self.tree.update(&mut self.target, state.doc());
		}
		self.state = state;
		if force_push || doc_changed || selection_changed {
			selection::push(&self.tree, &mut self.target, self.state.selection())?;
		}
		Ok(())
	}

	/// Applies `tr` to the current state and updates the view.
	pub fn dispatch(&mut self, tr: Transaction) -> Result<()> {
		let next = self.state.apply(&tr)?;
		debug!(
			steps = tr.steps().len(),
			version = next.version(),
			selection = ?next.selection(),
			"view.dispatch"
		);
		self.update_state(next)
	}

	/// Handles one notification from the render target.
	pub fn handle_event(&mut self, event: DomEvent) -> Result<InputOutcome> {
		match event {
			DomEvent::SelectionChange => self.pull_selection().map(InputOutcome::passed),
			DomEvent::BeforeInput(input) => self.handle_input(&input),
		}
	}

	/// Handles a before-input notification.
	///
	/// An editable view suppresses the platform's handling of every input,
	/// recognized or not, and applies its own transaction instead.
	pub fn handle_input(&mut self, event: &InputEvent) -> Result<InputOutcome> {
		if !self.config.editable {
			return Ok(InputOutcome::passed(false));
		}
		let Some(tr) = input::transaction_for(&self.state, &self.tree, &self.target, event)? else {
			return Ok(InputOutcome::handled(false));
		};
		debug!(intent = event.intent.as_input_type(), "view.input");
		self.dispatch(tr)?;
		Ok(InputOutcome::handled(true))
	}

	/// Drains and handles every queued notification.
	///
	/// Returns how many were handled. Stops at the first error; the rest of
	/// the batch is dropped.
	pub fn flush_events(&mut self) -> Result<usize> {
		let events = self.target.take_events();
		let count = events.len();
		for event in events {
			self.handle_event(event)?;
		}
		Ok(count)
	}

	/// Reads the native selection and dispatches it if it differs.
	///
	/// Coordinates that do not resolve inside this view abandon the pull.
	fn pull_selection(&mut self) -> Result<bool> {
		let selection = match selection::read(&self.tree, &self.target) {
			Ok(Some(selection)) => selection,
			Ok(None) => return Ok(false),
			Err(err) => {
				warn!(%err, "view.pull_abandoned");
				return Ok(false);
			}
		};
		if selection == self.state.selection() {
			return Ok(false);
		}

		let mut tr = self.state.tr();
		tr.set_selection(selection);
		self.dispatch(tr)?;
		Ok(true)
	}

	/// Replaces the configuration and re-applies it to the mount element.
	pub fn set_config(&mut self, config: ViewConfig) -> Result<()> {
		config.validate()?;
		let mount = self.mount();
		apply_config(&mut self.target, mount, Some(&self.config), &config);
		self.config = config;
		Ok(())
	}

	/// Native coordinate for a document position.
	pub fn locate(&self, pos: usize, prefer_before: bool) -> Result<NativePoint> {
		self.tree.locate(pos, prefer_before)
	}

	/// Document position for a native coordinate.
	pub fn position_at(&self, point: NativePoint) -> Result<usize> {
		self.tree.to_document_position(&self.target, point)
	}

	/// Tears the view down and hands the target back.
	///
	/// The mount element is left empty, non-editable and without the
	/// configured attributes.
	pub fn destroy(self) -> T {
		let Self {
			mut target,
			tree,
			config,
			..
		} = self;
		let mount = tree.mount_dom();
		target.listen_selection(false);
		tree.unmount(&mut target);
		target.set_editable(mount, false);
		for name in config.attributes.keys() {
			target.remove_attribute(mount, name);
		}
		debug!(?mount, "view.destroy");
		target
	}
}

fn apply_config<T: RenderTarget + ?Sized>(
	target: &mut T,
	mount: DomId,
	previous: Option<&ViewConfig>,
	config: &ViewConfig,
) {
	target.set_editable(mount, config.editable);
	if let Some(previous) = previous {
		for name in previous.attributes.keys().filter(|name| !config.attributes.contains_key(*name)) {
			target.remove_attribute(mount, name);
		}
	}
	for (name, value) in &config.attributes {
		target.set_attribute(mount, name, value);
	}
}
