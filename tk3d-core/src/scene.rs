/// Scene graph nodes and the traversal that draws them
use nalgebra::{Matrix4, Vector3};

use crate::draw::{Color, MeshDrawer};
use crate::error::SceneError;
use crate::geometry::MeshKind;
use crate::projectile::Projectile;
use crate::stack::TransformStack;
use crate::transform::LocalTransform;

/// A node of the assembly hierarchy.
///
/// Every node is drawn inside its own push/pop pair, so a node's local
/// transform reaches its descendants and nothing else.
#[derive(Debug, Clone)]
pub enum Node {
    /// Frame shared by its children; draws nothing itself
    Group {
        name: &'static str,
        local: LocalTransform,
        children: Vec<Node>,
    },
    /// One unit mesh sized and placed by `local`
    Part {
        name: &'static str,
        kind: MeshKind,
        local: LocalTransform,
        color: Color,
    },
    /// Live projectiles, positioned in the frame this node sits in
    ProjectileSet { diameter: f32, color: Color },
}

impl Node {
    /// A group frame; its local chain must be rigid so the frames of
    /// descendants such as the muzzle stay rotations plus translations
    pub fn group(name: &'static str, local: LocalTransform, children: Vec<Node>) -> Self {
        debug_assert!(local.is_rigid(), "group `{name}` scales its children");
        Node::Group {
            name,
            local,
            children,
        }
    }

    pub fn part(name: &'static str, kind: MeshKind, local: LocalTransform, color: Color) -> Self {
        Node::Part {
            name,
            kind,
            local,
            color,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Group { children, .. } => children,
            Node::Part { .. } | Node::ProjectileSet { .. } => &[],
        }
    }

    /// Number of `Part` nodes in this subtree
    pub fn part_count(&self) -> usize {
        match self {
            Node::Group { children, .. } => children.iter().map(Node::part_count).sum(),
            Node::Part { .. } => 1,
            Node::ProjectileSet { .. } => 0,
        }
    }

    /// Transform of the first node called `name` when this subtree is
    /// drawn under `base`: a group's frame, or the transform a part is
    /// drawn with.
    pub fn locate(&self, name: &str, base: &Matrix4<f32>) -> Option<Matrix4<f32>> {
        let mut stack = TransformStack::new();
        stack.load(*base);
        self.locate_in(name, &mut stack).ok().flatten()
    }

    fn locate_in(
        &self,
        name: &str,
        stack: &mut TransformStack,
    ) -> Result<Option<Matrix4<f32>>, SceneError> {
        stack.with_pushed(|stack| match self {
            Node::Group {
                name: own,
                local,
                children,
            } => {
                stack.compose_chain(local);
                if *own == name {
                    return Ok(Some(*stack.current()));
                }
                for child in children {
                    if let Some(found) = child.locate_in(name, stack)? {
                        return Ok(Some(found));
                    }
                }
                Ok(None)
            }
            Node::Part {
                name: own, local, ..
            } => {
                stack.compose_chain(local);
                Ok((*own == name).then(|| *stack.current()))
            }
            Node::ProjectileSet { .. } => Ok(None),
        })
    }
}

/// Draw `node` and its subtree against the current transform.
///
/// The stack depth on return equals the depth on entry.
pub fn traverse<D: MeshDrawer + ?Sized>(
    node: &Node,
    stack: &mut TransformStack,
    drawer: &mut D,
    projectiles: &[Projectile],
) -> Result<(), SceneError> {
    stack.with_pushed(|stack| match node {
        Node::Group {
            local, children, ..
        } => {
            stack.compose_chain(local);
            for child in children {
                traverse(child, stack, &mut *drawer, projectiles)?;
            }
            Ok(())
        }
        Node::Part {
            kind, local, color, ..
        } => {
            stack.compose_chain(local);
            drawer.draw(*kind, stack.current(), *color);
            Ok(())
        }
        Node::ProjectileSet { diameter, color } => {
            for projectile in projectiles {
                stack.with_pushed(|stack| {
                    stack.translate(projectile.position.coords);
                    stack.scale(Vector3::repeat(*diameter));
                    drawer.draw(MeshKind::Sphere, stack.current(), *color);
                    Ok(())
                })?;
            }
            Ok(())
        }
    })
}
