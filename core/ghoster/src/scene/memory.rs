use ghoster_traits::scene::*;
use std::collections::HashMap;

#[derive(Clone, Debug)]
struct SceneNode {
    kind: ObjectKind,
    parent: Option<String>,
    children: Vec<String>,
    shapes: Vec<ObjectKind>,
    attrs: HashMap<String, AttrValue>,
    shading_engine: Option<String>,
    surface_shader: Option<String>,
}

impl SceneNode {
    fn new(kind: ObjectKind) -> SceneNode {
        SceneNode {
            kind,
            parent: None,
            children: Vec::new(),
            shapes: Vec::new(),
            attrs: HashMap::new(),
            shading_engine: None,
            surface_shader: None,
        }
    }
}

/// Scene graph kept entirely in memory
#[derive(Debug, Default)]
pub struct MemoryScene {
    nodes: HashMap<String, SceneNode>,
    selection: Vec<String>,
    current_time: i32,
}

impl MemoryScene {
    pub fn new() -> MemoryScene {
        MemoryScene::default()
    }

    /// Adds a transform with a single mesh shape
    pub fn add_mesh(&mut self, name: &str) -> SceneResult<()> {
        self.insert(name, ObjectKind::Transform)?;

        if let Some(node) = self.nodes.get_mut(name) {
            node.shapes.push(ObjectKind::Mesh);
        }

        Ok(())
    }

    /// Material driving the object's surface, if one was assigned
    pub fn material_of(&self, object: &str) -> Option<&str> {
        let sg = self.nodes.get(object)?.shading_engine.as_ref()?;
        self.nodes.get(sg)?.surface_shader.as_deref()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn insert(&mut self, name: &str, kind: ObjectKind) -> SceneResult<()> {
        if self.nodes.contains_key(name) {
            return Err(SceneError::ObjectExists { name: name.to_owned() });
        }

        self.nodes.insert(name.to_owned(), SceneNode::new(kind));
        Ok(())
    }

    fn node(&self, name: &str) -> SceneResult<&SceneNode> {
        self.nodes
            .get(name)
            .ok_or_else(|| SceneError::ObjectNotFound { name: name.to_owned() })
    }

    fn node_mut(&mut self, name: &str) -> SceneResult<&mut SceneNode> {
        self.nodes
            .get_mut(name)
            .ok_or_else(|| SceneError::ObjectNotFound { name: name.to_owned() })
    }

    fn detach(&mut self, name: &str) {
        let Some(parent) = self.nodes.get_mut(name).and_then(|n| n.parent.take()) else {
            return;
        };

        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.retain(|c| c != name);
        }
    }
}

impl SceneHost for MemoryScene {
    fn object_exists(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    fn object_kind(&self, name: &str) -> SceneResult<ObjectKind> {
        self.node(name).map(|n| n.kind)
    }

    fn create_transform(&mut self, name: &str) -> SceneResult<()> {
        self.insert(name, ObjectKind::Transform)
    }

    fn duplicate(&mut self, source: &str, new_name: &str) -> SceneResult<()> {
        let src = self.node(source)?;
        if self.nodes.contains_key(new_name) {
            return Err(SceneError::ObjectExists { name: new_name.to_owned() });
        }

        let copy = SceneNode {
            parent: None,
            children: Vec::new(),
            ..src.clone()
        };

        self.nodes.insert(new_name.to_owned(), copy);
        Ok(())
    }

    fn delete(&mut self, name: &str) -> SceneResult<()> {
        self.node(name)?;
        self.detach(name);

        let mut pending = vec![name.to_owned()];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                pending.extend(node.children);
            }
            self.selection.retain(|s| s != &current);
        }

        Ok(())
    }

    fn parent(&mut self, child: &str, parent: &str) -> SceneResult<()> {
        self.node(child)?;
        self.node(parent)?;

        self.detach(child);
        self.node_mut(parent)?.children.push(child.to_owned());
        self.node_mut(child)?.parent = Some(parent.to_owned());

        Ok(())
    }

    fn children(&self, name: &str) -> SceneResult<Vec<String>> {
        self.node(name).map(|n| n.children.clone())
    }

    fn shapes(&self, name: &str) -> SceneResult<Vec<ObjectKind>> {
        self.node(name).map(|n| n.shapes.clone())
    }

    fn add_attr(&mut self, name: &str, attr: &str, default: AttrValue) -> SceneResult<()> {
        let node = self.node_mut(name)?;
        if node.attrs.contains_key(attr) {
            return Err(SceneError::AttrExists {
                name: name.to_owned(),
                attr: attr.to_owned()
            });
        }

        node.attrs.insert(attr.to_owned(), default);
        Ok(())
    }

    fn get_attr(&self, name: &str, attr: &str) -> SceneResult<AttrValue> {
        self.node(name)?
            .attrs
            .get(attr)
            .cloned()
            .ok_or_else(|| SceneError::AttrNotFound {
                name: name.to_owned(),
                attr: attr.to_owned()
            })
    }

    fn set_attr(&mut self, name: &str, attr: &str, value: AttrValue) -> SceneResult<()> {
        let node = self.node_mut(name)?;
        let Some(current) = node.attrs.get_mut(attr) else {
            return Err(SceneError::AttrNotFound {
                name: name.to_owned(),
                attr: attr.to_owned()
            });
        };

        if std::mem::discriminant(current) != std::mem::discriminant(&value) {
            return Err(SceneError::AttrTypeMismatch {
                name: name.to_owned(),
                attr: attr.to_owned(),
                expected: current.type_name(),
                actual: value.type_name()
            });
        }

        *current = value;
        Ok(())
    }

    fn create_material(&mut self, name: &str) -> SceneResult<()> {
        self.insert(name, ObjectKind::Material)?;

        let node = self.node_mut(name)?;
        node.attrs.insert(MATERIAL_COLOR_ATTR.to_owned(), AttrValue::Double3([0.0; 3]));
        node.attrs.insert(MATERIAL_TRANSPARENCY_ATTR.to_owned(), AttrValue::Double3([0.0; 3]));

        Ok(())
    }

    fn create_shading_engine(&mut self, name: &str) -> SceneResult<()> {
        self.insert(name, ObjectKind::ShadingEngine)
    }

    fn assign_material(&mut self, material: &str, shading_engine: &str, object: &str) -> SceneResult<()> {
        self.node(material)?;
        self.node(object)?;

        self.node_mut(shading_engine)?.surface_shader = Some(material.to_owned());
        self.node_mut(object)?.shading_engine = Some(shading_engine.to_owned());

        Ok(())
    }

    fn selection(&self) -> Vec<String> {
        self.selection.clone()
    }

    fn select(&mut self, names: &[String]) {
        self.selection = names
            .iter()
            .filter(|n| self.nodes.contains_key(n.as_str()))
            .cloned()
            .collect();
    }

    fn current_time(&self) -> i32 {
        self.current_time
    }

    fn set_current_time(&mut self, frame: i32) {
        self.current_time = frame;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_removes_descendants_and_parent_link() {
        let mut scene = MemoryScene::new();
        scene.create_transform("grp").unwrap();
        scene.add_mesh("a").unwrap();
        scene.add_mesh("b").unwrap();
        scene.parent("a", "grp").unwrap();
        scene.parent("b", "a").unwrap();

        scene.delete("a").unwrap();

        assert!(!scene.object_exists("a"));
        assert!(!scene.object_exists("b"));
        assert_eq!(scene.children("grp").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn duplicate_copies_shapes_but_not_parent() {
        let mut scene = MemoryScene::new();
        scene.create_transform("grp").unwrap();
        scene.add_mesh("body").unwrap();
        scene.parent("body", "grp").unwrap();

        scene.duplicate("body", "body_1").unwrap();

        assert_eq!(scene.shapes("body_1").unwrap(), vec![ObjectKind::Mesh]);
        assert_eq!(scene.children("grp").unwrap(), vec!["body".to_string()]);
        assert_eq!(
            scene.duplicate("missing", "x"),
            Err(SceneError::ObjectNotFound { name: "missing".into() })
        );
    }

    #[test]
    fn set_attr_checks_existence_and_type() {
        let mut scene = MemoryScene::new();
        scene.add_mesh("a").unwrap();
        scene.add_attr("a", "frame", AttrValue::Int(3)).unwrap();

        assert!(matches!(scene.add_attr("a", "frame", AttrValue::Int(4)), Err(SceneError::AttrExists { .. })));
        assert!(matches!(scene.set_attr("a", "other", AttrValue::Int(4)), Err(SceneError::AttrNotFound { .. })));
        assert!(matches!(scene.set_attr("a", "frame", "x".into()), Err(SceneError::AttrTypeMismatch { .. })));

        scene.set_attr("a", "frame", AttrValue::Int(9)).unwrap();
        assert_eq!(scene.get_attr("a", "frame").unwrap(), AttrValue::Int(9));
    }

    #[test]
    fn assigned_material_is_resolved_through_shading_engine() {
        let mut scene = MemoryScene::new();
        scene.add_mesh("a").unwrap();
        scene.create_material("a_mat").unwrap();
        scene.create_shading_engine("a_sg").unwrap();
        scene.assign_material("a_mat", "a_sg", "a").unwrap();

        assert_eq!(scene.material_of("a"), Some("a_mat"));
        assert_eq!(
            scene.get_attr("a_mat", MATERIAL_TRANSPARENCY_ATTR).unwrap(),
            AttrValue::Double3([0.0; 3])
        );
    }

    #[test]
    fn selection_ignores_unknown_names() {
        let mut scene = MemoryScene::new();
        scene.add_mesh("a").unwrap();
        scene.select(&["a".to_string(), "ghost".to_string()]);
        assert_eq!(scene.selection(), vec!["a".to_string()]);
    }
}
