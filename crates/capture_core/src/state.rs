use crate::view_model::AppViewModel;
use crate::{FieldModel, FormDefaults};

/// Monotonically increasing id assigned to each dispatched capture.
pub type Generation = u64;

/// Outcome of one capture, as reported by the capture client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureResult {
    Success { path: String },
    Failure { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Pending,
    Succeeded(String),
    Failed(String),
}

impl Status {
    pub fn is_pending(&self) -> bool {
        matches!(self, Status::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    fields: FieldModel,
    status: Status,
    generation: Generation,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(defaults: FormDefaults) -> Self {
        Self {
            fields: FieldModel::new(defaults),
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::from_state(&self.fields, &self.status)
    }

    pub fn fields(&self) -> &FieldModel {
        &self.fields
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Generation of the most recently dispatched capture; 0 before the first.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn fields_mut(&mut self) -> &mut FieldModel {
        self.dirty = true;
        &mut self.fields
    }

    pub(crate) fn begin_capture(&mut self) -> Generation {
        self.generation += 1;
        self.set_status(Status::Pending);
        self.generation
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
        self.dirty = true;
    }
}
