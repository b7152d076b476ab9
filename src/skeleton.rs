use glam::Mat4;

use crate::base::IkError;
use crate::joint::Joint;
use crate::render::JointRenderer;

///
/// Arena owning every joint of a kinematic tree.
///
/// Joints are addressed by stable indices, in insertion order. Each joint
/// stores its optional parent index and its ordered child indices, so the
/// hierarchy can be walked without any pointer ownership. Dropping the
/// skeleton releases every joint once.
///
/// The arena is a forest: `add_root()` may be called more than once, and
/// `update()` walks every root. `Chain` holds a single root and only uses
/// `update_from()`.
///
/// A joint is always added after its parent, so index order is a valid
/// top-down order, but it is not a depth-first order when the tree branches.
/// Use `iter_depth_first()` for that.
///
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "rkyv", derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize))]
pub struct Skeleton {
    joints: Vec<Joint>,
}

impl Skeleton {
    /// Creates an empty skeleton.
    pub fn new() -> Skeleton {
        return Skeleton { joints: Vec::new() };
    }

    /// Creates an empty skeleton able to hold `capacity` joints without reallocating.
    pub fn with_capacity(capacity: usize) -> Skeleton {
        return Skeleton {
            joints: Vec::with_capacity(capacity),
        };
    }

    /// Adds a root joint (without parent), returns its index.
    pub fn add_root(&mut self, mut joint: Joint) -> usize {
        joint.parent = None;
        joint.children.clear();
        self.joints.push(joint);
        return self.joints.len() - 1;
    }

    /// Appends `joint` to `parent`'s children and takes ownership of it,
    /// returns the new joint index.
    ///
    /// The child always gets a fresh index, so no cycle can be built.
    pub fn add_child(&mut self, parent: usize, mut joint: Joint) -> Result<usize, IkError> {
        if parent >= self.joints.len() {
            return Err(IkError::InvalidIndex(parent));
        }
        let idx = self.joints.len();
        joint.parent = Some(parent);
        joint.children.clear();
        self.joints.push(joint);
        self.joints[parent].children.push(idx);
        return Ok(idx);
    }
}

impl Skeleton {
    /// Gets the number of joints.
    #[inline]
    pub fn num_joints(&self) -> usize {
        return self.joints.len();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        return self.joints.is_empty();
    }

    /// Gets all joints, in index order.
    #[inline]
    pub fn joints(&self) -> &[Joint] {
        return &self.joints;
    }

    /// Gets a joint by index.
    ///
    /// * `idx` - `idx` must be in range [0, num joints).
    #[inline]
    pub fn joint(&self, idx: usize) -> &Joint {
        return &self.joints[idx];
    }

    /// Gets a mutable joint by index.
    ///
    /// * `idx` - `idx` must be in range [0, num joints).
    #[inline]
    pub fn joint_mut(&mut self, idx: usize) -> &mut Joint {
        return &mut self.joints[idx];
    }

    /// Gets a joint by index, fails if out of range.
    #[inline]
    pub fn try_joint(&self, idx: usize) -> Result<&Joint, IkError> {
        return self.joints.get(idx).ok_or(IkError::InvalidIndex(idx));
    }

    /// Gets joint's parent by index.
    #[inline]
    pub fn joint_parent(&self, idx: usize) -> Option<usize> {
        return self.joints[idx].parent;
    }

    /// Test if a joint is a leaf.
    #[inline]
    pub fn is_leaf(&self, idx: usize) -> bool {
        return self.joints[idx].children.is_empty();
    }

    /// Iterates through the hierarchy below `from` (included) in depth-first
    /// pre-order. Children are visited in insertion order.
    ///
    /// * `f` - The function to call for each joint. The function takes arguments `(joint, parent)`.
    pub fn iter_depth_first<F>(&self, from: usize, mut f: F)
    where
        F: FnMut(usize, Option<usize>),
    {
        if from >= self.joints.len() {
            return;
        }
        let mut stack = vec![from];
        while let Some(idx) = stack.pop() {
            let joint = &self.joints[idx];
            f(idx, joint.parent);
            stack.extend(joint.children.iter().rev());
        }
    }

    /// Recomputes world matrices of `from` and its whole subtree.
    ///
    /// `from` gets `parent_world * local`, every descendant gets its parent's
    /// freshly computed world matrix times its own local one. Parents are
    /// always computed before their children.
    pub fn update_from(&mut self, from: usize, parent_world: &Mat4) {
        if from >= self.joints.len() {
            return;
        }
        let mut stack = vec![(from, *parent_world)];
        while let Some((idx, parent_world)) = stack.pop() {
            let joint = &mut self.joints[idx];
            joint.update(&parent_world);
            let world = *joint.world_matrix();
            stack.extend(joint.children.iter().rev().map(|child| (*child, world)));
        }
    }

    /// Recomputes world matrices of every root and their subtrees.
    pub fn update(&mut self, root_world: &Mat4) {
        for idx in 0..self.joints.len() {
            if self.joints[idx].parent.is_none() {
                self.update_from(idx, root_world);
            }
        }
    }

    /// Draws `from` and its subtree in depth-first pre-order.
    pub fn draw<R: JointRenderer + ?Sized>(&self, from: usize, view_proj: &Mat4, shader: &R::Shader, renderer: &mut R) {
        self.iter_depth_first(from, |idx, _| {
            self.joints[idx].draw(idx, view_proj, shader, renderer);
        });
    }
}
