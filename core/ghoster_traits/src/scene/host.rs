use super::{AttrValue, ObjectKind};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError, PartialEq)]
pub enum SceneError {
    #[error("Object \"{name}\" does not exist")]
    ObjectNotFound {
        name: String
    },
    #[error("Object \"{name}\" already exists")]
    ObjectExists {
        name: String
    },
    #[error("Attribute \"{name}.{attr}\" does not exist")]
    AttrNotFound {
        name: String,
        attr: String
    },
    #[error("Attribute \"{name}.{attr}\" already exists")]
    AttrExists {
        name: String,
        attr: String
    },
    #[error("Attribute \"{name}.{attr}\" expects {expected}, got {actual}")]
    AttrTypeMismatch {
        name: String,
        attr: String,
        expected: &'static str,
        actual: &'static str
    },
}

/// Materials always carry these `Double3` attributes
pub const MATERIAL_COLOR_ATTR: &str = "color";
pub const MATERIAL_TRANSPARENCY_ATTR: &str = "transparency";

pub type SceneResult<T> = Result<T, SceneError>;

/// Capabilities the ghosting logic needs from a host scene graph.
///
/// Objects are addressed by unique names. Implementations decide how names
/// map to their own node handles.
pub trait SceneHost {
    fn object_exists(&self, name: &str) -> bool;
    fn object_kind(&self, name: &str) -> SceneResult<ObjectKind>;

    /// Creates an empty transform (group) node
    fn create_transform(&mut self, name: &str) -> SceneResult<()>;
    /// Copies `source` and its shapes under a new name, unparented
    fn duplicate(&mut self, source: &str, new_name: &str) -> SceneResult<()>;
    /// Deletes the object and all of its descendants
    fn delete(&mut self, name: &str) -> SceneResult<()>;
    fn parent(&mut self, child: &str, parent: &str) -> SceneResult<()>;
    fn children(&self, name: &str) -> SceneResult<Vec<String>>;
    fn shapes(&self, name: &str) -> SceneResult<Vec<ObjectKind>>;

    fn add_attr(&mut self, name: &str, attr: &str, default: AttrValue) -> SceneResult<()>;
    fn get_attr(&self, name: &str, attr: &str) -> SceneResult<AttrValue>;
    fn set_attr(&mut self, name: &str, attr: &str, value: AttrValue) -> SceneResult<()>;

    fn create_material(&mut self, name: &str) -> SceneResult<()>;
    fn create_shading_engine(&mut self, name: &str) -> SceneResult<()>;
    /// Connects material to shading engine and assigns the engine to object
    fn assign_material(&mut self, material: &str, shading_engine: &str, object: &str) -> SceneResult<()>;

    fn selection(&self) -> Vec<String>;
    fn select(&mut self, names: &[String]);

    fn current_time(&self) -> i32;
    fn set_current_time(&mut self, frame: i32);
}
