use std::cell::RefCell;
use std::rc::Rc;

use kinema_core::{Clock, Color};

use crate::object::{Drawable, SharedObject};
use crate::time_manager::TimeManager;

/// The drawable objects on stage plus the time manager animating them.
///
/// Membership has set semantics keyed on object identity: adding an object
/// that is already present, or removing one that is not, changes nothing.
/// Objects are drawn in insertion order.
pub struct Scene {
    objects: Vec<SharedObject>,
    time_manager: TimeManager,
    background: Color,
}

impl Scene {
    /// Create an empty scene whose animations read `clock`.
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            objects: Vec::new(),
            time_manager: TimeManager::new(clock),
            background: Color::CHARCOAL,
        }
    }

    /// Add an object unless it is already a member.
    pub fn add<D: Drawable + 'static>(&mut self, object: &Rc<RefCell<D>>) -> &mut Self {
        let shared: SharedObject = object.clone();
        self.add_shared(shared)
    }

    pub fn add_shared(&mut self, object: SharedObject) -> &mut Self {
        if !self.contains_shared(&object) {
            self.objects.push(object);
        }
        self
    }

    /// Remove an object if it is a member.
    pub fn remove<D: Drawable + 'static>(&mut self, object: &Rc<RefCell<D>>) -> &mut Self {
        let shared: SharedObject = object.clone();
        self.remove_shared(&shared)
    }

    pub fn remove_shared(&mut self, object: &SharedObject) -> &mut Self {
        self.objects.retain(|member| !Rc::ptr_eq(member, object));
        self
    }

    pub fn contains<D: Drawable + 'static>(&self, object: &Rc<RefCell<D>>) -> bool {
        let shared: SharedObject = object.clone();
        self.contains_shared(&shared)
    }

    pub fn contains_shared(&self, object: &SharedObject) -> bool {
        self.objects.iter().any(|member| Rc::ptr_eq(member, object))
    }

    /// Remove every object and drop all pending animations.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.time_manager.clear();
    }

    pub fn objects(&self) -> &[SharedObject] {
        &self.objects
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn time_manager(&self) -> &TimeManager {
        &self.time_manager
    }

    pub fn time_manager_mut(&mut self) -> &mut TimeManager {
        &mut self.time_manager
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background_color(&mut self, color: Color) -> &mut Self {
        self.background = color;
        self
    }
}
