// std
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
// others
use tracing::{debug, warn};
use typed_arena::Arena;
// pbrt
use crate::core::error::{Error, Result};
use crate::core::geometry::{bnd3_union_bnd3f, bnd3_union_pnt3f};
use crate::core::geometry::{Bounds3f, Point3f, Ray, Vector3f};
use crate::core::interaction::SurfaceInteraction;
use crate::core::paramset::ParamSet;
use crate::core::pbrt::Float;
use crate::core::primitive::{find_in_primitives, fully_refine, Aggregate, Primitive};

// see bvh.h

/// Ranges with fewer primitives always become leaves. SAH builds
/// split ranges larger than this even if splitting looks expensive.
pub const DEFAULT_MAX_PRIMS_IN_NODE: usize = 10;
/// Number of buckets the SAH distributes centroids into (per axis).
pub const N_BUCKETS: usize = 12;
/// Capacity of the traversal stack. Trees have to stay shallower.
pub const MAX_TODO: usize = 64;
/// Ranges of this size or smaller are split into equal counts
/// instead of evaluating the SAH.
const SAH_MIN_PRIMS: usize = 4;
/// Relative cost of a ray/box test compared to a ray/primitive test.
const TRAVERSAL_COST: Float = 0.125;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SplitMethod {
    SAH,
    Middle,
    EqualCounts,
}

impl Default for SplitMethod {
    fn default() -> Self {
        SplitMethod::SAH
    }
}

impl FromStr for SplitMethod {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sah" => Ok(SplitMethod::SAH),
            "middle" => Ok(SplitMethod::Middle),
            "equal" => Ok(SplitMethod::EqualCounts),
            _ => Err(Error::UnknownSplitMethod(s.to_string())),
        }
    }
}

impl fmt::Display for SplitMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            SplitMethod::SAH => "sah",
            SplitMethod::Middle => "middle",
            SplitMethod::EqualCounts => "equal",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct BVHPrimitiveInfo {
    pub primitive_number: usize,
    pub bounds: Bounds3f,
    pub centroid: Point3f,
}

impl BVHPrimitiveInfo {
    pub fn new(primitive_number: usize, bounds: Bounds3f) -> Self {
        BVHPrimitiveInfo {
            primitive_number,
            bounds,
            centroid: bounds.p_min * 0.5 + bounds.p_max * 0.5,
        }
    }
}

#[derive(Debug)]
pub struct BVHBuildNode<'a> {
    pub bounds: Bounds3f,
    pub child1: Option<&'a mut BVHBuildNode<'a>>,
    pub child2: Option<&'a mut BVHBuildNode<'a>>,
    pub split_axis: u8,
    pub first_prim_offset: usize,
    pub n_primitives: usize,
}

impl<'a> Default for BVHBuildNode<'a> {
    fn default() -> Self {
        BVHBuildNode {
            bounds: Bounds3f::default(),
            child1: None,
            child2: None,
            split_axis: 0_u8,
            first_prim_offset: 0_usize,
            n_primitives: 0_usize,
        }
    }
}

impl<'a> BVHBuildNode<'a> {
    pub fn init_leaf(&mut self, first: usize, n: usize, b: &Bounds3f) {
        self.first_prim_offset = first;
        self.n_primitives = n;
        self.bounds = *b;
        self.child1 = None;
        self.child2 = None;
    }
    pub fn init_interior(
        &mut self,
        axis: u8,
        c0: &'a mut BVHBuildNode<'a>,
        c1: &'a mut BVHBuildNode<'a>,
    ) {
        self.n_primitives = 0;
        self.bounds = bnd3_union_bnd3f(&c0.bounds, &c1.bounds);
        self.child1 = Some(c0);
        self.child2 = Some(c1);
        self.split_axis = axis;
    }
}

#[derive(Debug, Copy, Clone)]
struct BucketInfo {
    count: usize,
    bounds: Bounds3f,
}

impl Default for BucketInfo {
    fn default() -> Self {
        BucketInfo {
            count: 0_usize,
            bounds: Bounds3f::default(),
        }
    }
}

/// Node of the flattened tree. Interior nodes are followed directly
/// by their first child, *offset* is the index of the second child.
/// For leaves *offset* is the index of the first primitive.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct LinearBVHNode {
    pub bounds: Bounds3f,
    // in C++ a union { int primitivesOffset;     // leaf
    //                  int secondChildOffset; }; // interior
    pub offset: usize,
    pub n_primitives: usize,
    pub axis: u8,
}

impl LinearBVHNode {
    pub fn is_leaf(&self) -> bool {
        self.n_primitives > 0
    }
}

/// Best split found by the surface area heuristic.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SahSplit {
    pub axis: u8,
    /// primitives in buckets `0..=bucket` go to the first child
    pub bucket: usize,
    pub cost: Float,
}

/// Bucket of a centroid along *axis*, relative to the bounds of all
/// centroids.
pub fn bucket_index(centroid_bounds: &Bounds3f, centroid: &Point3f, axis: u8) -> usize {
    let b: usize = (N_BUCKETS as Float * centroid_bounds.offset(centroid)[axis]) as usize;
    let b: usize = b.min(N_BUCKETS - 1);
    assert!(b < N_BUCKETS, "b < {}", N_BUCKETS);
    b
}

/// Estimated costs for splitting after each of the first
/// `N_BUCKETS - 1` buckets along *axis*.
pub fn sah_costs(
    primitive_info: &[BVHPrimitiveInfo],
    bounds: &Bounds3f,
    centroid_bounds: &Bounds3f,
    axis: u8,
) -> [Float; N_BUCKETS - 1] {
    // initialize _BucketInfo_ for SAH partition buckets
    let mut buckets: [BucketInfo; N_BUCKETS] = [BucketInfo::default(); N_BUCKETS];
    for pi in primitive_info {
        let b: usize = bucket_index(centroid_bounds, &pi.centroid, axis);
        buckets[b].count += 1;
        buckets[b].bounds = bnd3_union_bnd3f(&buckets[b].bounds, &pi.bounds);
    }
    // flat or point-like nodes have no area to divide by
    let area: Float = bounds.surface_area();
    let inv_area: Float = if area > 0.0 as Float {
        1.0 as Float / area
    } else {
        0.0 as Float
    };
    // compute costs for splitting after each bucket
    let mut cost: [Float; N_BUCKETS - 1] = [0.0; N_BUCKETS - 1];
    for (i, c) in cost.iter_mut().enumerate() {
        let mut b0: Bounds3f = Bounds3f::default();
        let mut b1: Bounds3f = Bounds3f::default();
        let mut count0: usize = 0;
        let mut count1: usize = 0;
        for bucket in &buckets[..=i] {
            b0 = bnd3_union_bnd3f(&b0, &bucket.bounds);
            count0 += bucket.count;
        }
        for bucket in &buckets[(i + 1)..] {
            b1 = bnd3_union_bnd3f(&b1, &bucket.bounds);
            count1 += bucket.count;
        }
        *c = TRAVERSAL_COST
            + (count0 as Float * b0.surface_area() + count1 as Float * b1.surface_area())
                * inv_area;
    }
    cost
}

/// Cheapest bucket boundary over all axes along which the centroids
/// are spread out. Returns `None` if all centroids coincide.
pub fn sah_split(
    primitive_info: &[BVHPrimitiveInfo],
    bounds: &Bounds3f,
    centroid_bounds: &Bounds3f,
) -> Option<SahSplit> {
    let mut best: Option<SahSplit> = None;
    for axis in 0..3_u8 {
        if centroid_bounds.is_degenerate(axis) {
            continue;
        }
        let cost = sah_costs(primitive_info, bounds, centroid_bounds, axis);
        // find bucket to split at that minimizes SAH metric
        for (bucket, c) in cost.iter().enumerate() {
            let better: bool = match best {
                Some(ref split) => *c < split.cost,
                None => true,
            };
            if better {
                best = Some(SahSplit {
                    axis,
                    bucket,
                    cost: *c,
                });
            }
        }
    }
    best
}

/// Moves all elements matching *pred* to the front and returns their
/// number. The relative order is not preserved.
fn partition<T, F>(items: &mut [T], mut pred: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    let mut first: usize = 0;
    for i in 0..items.len() {
        if pred(&items[i]) {
            items.swap(first, i);
            first += 1;
        }
    }
    first
}

/// Order statistic selection of the median centroid along *dim*.
fn split_equal_counts(primitive_info: &mut [BVHPrimitiveInfo], dim: u8) -> usize {
    let mid: usize = primitive_info.len() / 2;
    primitive_info.select_nth_unstable_by(mid, |a, b| a.centroid[dim].total_cmp(&b.centroid[dim]));
    mid
}

/// Number of halvings until *n* items are down to one.
fn ceil_log2(n: usize) -> usize {
    if n <= 1 {
        0
    } else {
        (usize::BITS - (n - 1).leading_zeros()) as usize
    }
}

/// Counters and output of a single build.
struct BuildState {
    total_nodes: usize,
    max_depth: usize,
    ordered_prims: Vec<Arc<dyn Primitive + Send + Sync>>,
}

/// Bounding volume hierarchy over a set of primitives.
///
/// Primitives are registered (or passed to **new()**), refined and
/// sorted into a binary tree by **preprocess()**. The tree is
/// immutable afterwards: queries take `&self` and can run on many
/// threads at once, anything changing the primitive set takes
/// `&mut self` and invalidates the tree until it is rebuilt.
// BVHAccel -> Aggregate -> Primitive
pub struct BVHAccel {
    name: String,
    max_prims_in_node: usize,
    split_method: SplitMethod,
    primitives: Vec<Arc<dyn Primitive + Send + Sync>>,
    nodes: Vec<LinearBVHNode>,
    max_depth: usize,
    built: bool,
}

impl Default for BVHAccel {
    fn default() -> Self {
        BVHAccel::with_settings(DEFAULT_MAX_PRIMS_IN_NODE, SplitMethod::default())
    }
}

impl BVHAccel {
    /// Builds the hierarchy over *p* right away.
    pub fn new(
        p: Vec<Arc<dyn Primitive + Send + Sync>>,
        max_prims_in_node: usize,
        split_method: SplitMethod,
    ) -> Self {
        let mut bvh = BVHAccel::with_settings(max_prims_in_node, split_method);
        bvh.primitives = p;
        bvh.preprocess();
        bvh
    }
    /// An empty, unbuilt hierarchy. Register primitives with
    /// **add_primitive()** and call **preprocess()**.
    pub fn with_settings(max_prims_in_node: usize, split_method: SplitMethod) -> Self {
        BVHAccel {
            name: String::from("bvh"),
            max_prims_in_node: max_prims_in_node.clamp(1, 255),
            split_method,
            primitives: Vec::new(),
            nodes: Vec::new(),
            max_depth: 0,
            built: false,
        }
    }
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
    /// Reads `"splitmethod"` and `"maxnodeprims"` from *ps*. Unknown
    /// split methods fall back to SAH and out of range leaf sizes are
    /// clamped.
    pub fn create(prims: Vec<Arc<dyn Primitive + Send + Sync>>, ps: &ParamSet) -> BVHAccel {
        let split_method_name: String = ps.find_one_string("splitmethod", String::from("sah"));
        let split_method: SplitMethod = match split_method_name.parse() {
            Ok(split_method) => split_method,
            Err(e) => {
                warn!("{}, using \"sah\"", e);
                SplitMethod::SAH
            }
        };
        let max_prims_in_node: i32 =
            ps.find_one_int("maxnodeprims", DEFAULT_MAX_PRIMS_IN_NODE as i32);
        BVHAccel::new(prims, max_prims_in_node.clamp(1, 255) as usize, split_method)
    }
    /// Like **create()**, but rejects invalid parameters.
    pub fn try_create(
        prims: Vec<Arc<dyn Primitive + Send + Sync>>,
        ps: &ParamSet,
    ) -> Result<BVHAccel> {
        let split_method: SplitMethod = ps
            .find_one_string("splitmethod", String::from("sah"))
            .parse()?;
        let max_prims_in_node: i32 =
            ps.find_one_int("maxnodeprims", DEFAULT_MAX_PRIMS_IN_NODE as i32);
        if !(1..=255).contains(&max_prims_in_node) {
            return Err(Error::InvalidParameter {
                name: String::from("maxnodeprims"),
                value: max_prims_in_node.to_string(),
            });
        }
        Ok(BVHAccel::new(
            prims,
            max_prims_in_node as usize,
            split_method,
        ))
    }
    pub fn split_method(&self) -> SplitMethod {
        self.split_method
    }
    pub fn max_prims_in_node(&self) -> usize {
        self.max_prims_in_node
    }
    pub fn is_built(&self) -> bool {
        self.built
    }
    /// The flattened tree, empty if nothing was built.
    pub fn nodes(&self) -> &[LinearBVHNode] {
        &self.nodes
    }
    pub fn total_nodes(&self) -> usize {
        self.nodes.len()
    }
    /// Depth of the deepest node (the root has depth zero).
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
    pub fn len(&self) -> usize {
        self.primitives.len()
    }
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
    /// The registered primitives. After a build they are refined and
    /// ordered so that each leaf owns a contiguous range.
    pub fn get_primitives(&self) -> &[Arc<dyn Primitive + Send + Sync>] {
        &self.primitives
    }
    pub fn add_primitive(&mut self, primitive: Arc<dyn Primitive + Send + Sync>) {
        if self.built {
            warn!(
                "primitive \"{}\" added to built BVH \"{}\", rebuild required",
                primitive.get_name(),
                self.name
            );
            self.invalidate();
        }
        self.primitives.push(primitive);
    }
    /// Removes all primitives called *name* and returns how many
    /// were removed. The tree has to be rebuilt afterwards.
    pub fn remove_primitive(&mut self, name: &str) -> usize {
        let before: usize = self.primitives.len();
        self.primitives.retain(|p| p.get_name() != name);
        let removed: usize = before - self.primitives.len();
        if removed > 0 {
            debug!("removed {} primitive(s) \"{}\"", removed, name);
        }
        self.invalidate();
        removed
    }
    /// Discards the current tree and builds a new one over the
    /// current primitive set.
    pub fn rebuild(&mut self) {
        self.invalidate();
        self.preprocess();
    }
    fn invalidate(&mut self) {
        self.nodes.clear();
        self.max_depth = 0;
        self.built = false;
    }
    /// Refines composite primitives and builds the tree.
    pub fn preprocess(&mut self) {
        let primitives: Vec<Arc<dyn Primitive + Send + Sync>> = fully_refine(&self.primitives);
        let num_prims: usize = primitives.len();
        self.nodes.clear();
        self.max_depth = 0;
        if num_prims == 0_usize {
            self.primitives = primitives;
            self.built = true;
            return;
        }
        let mut primitive_info: Vec<BVHPrimitiveInfo> = primitives
            .iter()
            .enumerate()
            .map(|(i, p)| BVHPrimitiveInfo::new(i, p.world_bound()))
            .collect();
        let arena: Arena<BVHBuildNode> = Arena::with_capacity(2 * num_prims);
        let mut state: BuildState = BuildState {
            total_nodes: 0,
            max_depth: 0,
            ordered_prims: Vec::with_capacity(num_prims),
        };
        let root =
            self.recursive_build(&arena, &primitives, &mut primitive_info, 0, &mut state);
        // flatten first
        let mut nodes = vec![LinearBVHNode::default(); state.total_nodes];
        let mut offset: usize = 0;
        BVHAccel::flatten_bvh_tree(root, &mut nodes, &mut offset);
        assert!(offset == state.total_nodes);
        assert!(state.ordered_prims.len() == num_prims);
        debug!(
            "BVH \"{}\" ({}) created with {} nodes for {} primitives, max depth {}",
            self.name, self.split_method, state.total_nodes, num_prims, state.max_depth
        );
        // primitives.swap(orderedPrims);
        self.primitives = state.ordered_prims;
        self.nodes = nodes;
        self.max_depth = state.max_depth;
        self.built = true;
    }
    fn init_leaf<'a>(
        node: &mut BVHBuildNode<'a>,
        primitives: &[Arc<dyn Primitive + Send + Sync>],
        primitive_info: &[BVHPrimitiveInfo],
        bounds: &Bounds3f,
        state: &mut BuildState,
    ) {
        // create leaf _BVHBuildNode_
        let first_prim_offset: usize = state.ordered_prims.len();
        for pi in primitive_info {
            state
                .ordered_prims
                .push(primitives[pi.primitive_number].clone());
        }
        node.init_leaf(first_prim_offset, primitive_info.len(), bounds);
    }
    fn recursive_build<'a>(
        &self,
        arena: &'a Arena<BVHBuildNode<'a>>,
        primitives: &[Arc<dyn Primitive + Send + Sync>],
        primitive_info: &mut [BVHPrimitiveInfo],
        depth: usize,
        state: &mut BuildState,
    ) -> &'a mut BVHBuildNode<'a> {
        assert!(!primitive_info.is_empty());
        assert!(
            depth < MAX_TODO,
            "BVH depth {} exceeds traversal stack capacity {}",
            depth,
            MAX_TODO
        );
        let node: &mut BVHBuildNode<'a> = arena.alloc(BVHBuildNode::default());
        state.total_nodes += 1_usize;
        state.max_depth = state.max_depth.max(depth);
        // compute bounds of all primitives in BVH node
        let bounds: Bounds3f = primitive_info
            .iter()
            .fold(Bounds3f::default(), |b, pi| bnd3_union_bnd3f(&b, &pi.bounds));
        let n_primitives: usize = primitive_info.len();
        if n_primitives < self.max_prims_in_node {
            BVHAccel::init_leaf(node, primitives, primitive_info, &bounds, state);
            return node;
        }
        // compute bound of primitive centroids, choose split dimension _dim_
        let centroid_bounds: Bounds3f = primitive_info
            .iter()
            .fold(Bounds3f::default(), |b, pi| bnd3_union_pnt3f(&b, &pi.centroid));
        let mut dim: u8 = centroid_bounds.maximum_extent();
        if centroid_bounds.is_degenerate(dim) {
            // all centroids coincide
            BVHAccel::init_leaf(node, primitives, primitive_info, &bounds, state);
            return node;
        }
        // close to the traversal stack limit only median splits are
        // used, they bound the remaining depth by ceil(log2(n))
        let median_only: bool = depth + ceil_log2(n_primitives) + 1 >= MAX_TODO;
        // partition primitives based on _splitMethod_
        let mut mid: usize = match self.split_method {
            _ if median_only => split_equal_counts(primitive_info, dim),
            SplitMethod::Middle => {
                let pmid: Float =
                    (centroid_bounds.p_min[dim] + centroid_bounds.p_max[dim]) / 2.0 as Float;
                partition(primitive_info, |pi| pi.centroid[dim] < pmid)
            }
            SplitMethod::EqualCounts => split_equal_counts(primitive_info, dim),
            SplitMethod::SAH => {
                if n_primitives <= SAH_MIN_PRIMS {
                    split_equal_counts(primitive_info, dim)
                } else {
                    match sah_split(primitive_info, &bounds, &centroid_bounds) {
                        // either create leaf or split primitives
                        // at selected SAH bucket
                        Some(split)
                            if n_primitives > self.max_prims_in_node
                                || split.cost < n_primitives as Float =>
                        {
                            dim = split.axis;
                            partition(primitive_info, |pi| {
                                bucket_index(&centroid_bounds, &pi.centroid, split.axis)
                                    <= split.bucket
                            })
                        }
                        _ => {
                            BVHAccel::init_leaf(node, primitives, primitive_info, &bounds, state);
                            return node;
                        }
                    }
                }
            }
        };
        if mid == 0 || mid == n_primitives {
            // all primitives ended up on one side
            mid = split_equal_counts(primitive_info, dim);
        }
        let (left, right) = primitive_info.split_at_mut(mid);
        let c0 = self.recursive_build(arena, primitives, left, depth + 1, state);
        let c1 = self.recursive_build(arena, primitives, right, depth + 1, state);
        node.init_interior(dim, c0, c1);
        node
    }
    fn flatten_bvh_tree<'a>(
        node: &mut BVHBuildNode<'a>,
        nodes: &mut Vec<LinearBVHNode>,
        offset: &mut usize,
    ) -> usize {
        let my_offset: usize = *offset;
        *offset += 1;
        if node.n_primitives > 0 {
            // leaf
            nodes[my_offset] = LinearBVHNode {
                bounds: node.bounds,
                offset: node.first_prim_offset,
                n_primitives: node.n_primitives,
                axis: 0_u8,
            };
        } else {
            // interior
            if let Some(ref mut child1) = node.child1 {
                BVHAccel::flatten_bvh_tree(child1, nodes, offset);
            }
            if let Some(ref mut child2) = node.child2 {
                nodes[my_offset] = LinearBVHNode {
                    bounds: node.bounds,
                    offset: BVHAccel::flatten_bvh_tree(child2, nodes, offset),
                    n_primitives: 0_usize,
                    axis: node.split_axis,
                };
            }
        }
        my_offset
    }
}

fn traversal_setup(ray: &Ray) -> (Vector3f, [u8; 3]) {
    let inv_dir: Vector3f = Vector3f {
        x: 1.0 / ray.d.x,
        y: 1.0 / ray.d.y,
        z: 1.0 / ray.d.z,
    };
    let dir_is_neg: [u8; 3] = [
        (inv_dir.x < 0.0) as u8,
        (inv_dir.y < 0.0) as u8,
        (inv_dir.z < 0.0) as u8,
    ];
    (inv_dir, dir_is_neg)
}

impl Primitive for BVHAccel {
    fn world_bound(&self) -> Bounds3f {
        if let Some(root) = self.nodes.first() {
            root.bounds
        } else {
            Bounds3f::default()
        }
    }
    fn intersect(&self, ray: &mut Ray) -> Option<SurfaceInteraction> {
        if self.nodes.is_empty() {
            return None;
        }
        let (inv_dir, dir_is_neg) = traversal_setup(ray);
        // follow ray through BVH nodes to find primitive intersections
        let mut to_visit_offset: usize = 0;
        let mut current_node_index: usize = 0;
        let mut nodes_to_visit: [u32; MAX_TODO] = [0_u32; MAX_TODO];
        let mut si: Option<SurfaceInteraction> = None;
        loop {
            let node: &LinearBVHNode = &self.nodes[current_node_index];
            // check ray against BVH node
            if node.bounds.intersect_p(ray, &inv_dir, &dir_is_neg) {
                if node.is_leaf() {
                    // intersect ray with primitives in leaf BVH node
                    for primitive in &self.primitives[node.offset..(node.offset + node.n_primitives)]
                    {
                        // a hit shrinks ray.t_max, later hits are closer
                        if let Some(isect) = primitive.intersect(ray) {
                            si = Some(isect);
                        }
                    }
                    if to_visit_offset == 0 {
                        break;
                    }
                    to_visit_offset -= 1;
                    current_node_index = nodes_to_visit[to_visit_offset] as usize;
                } else {
                    // put far BVH node on _nodesToVisit_ stack,
                    // advance to near node
                    if dir_is_neg[node.axis as usize] == 1_u8 {
                        nodes_to_visit[to_visit_offset] = (current_node_index + 1) as u32;
                        current_node_index = node.offset;
                    } else {
                        nodes_to_visit[to_visit_offset] = node.offset as u32;
                        current_node_index += 1;
                    }
                    to_visit_offset += 1;
                }
            } else {
                if to_visit_offset == 0 {
                    break;
                }
                to_visit_offset -= 1;
                current_node_index = nodes_to_visit[to_visit_offset] as usize;
            }
        }
        si
    }
    fn intersect_p(&self, ray: &Ray) -> bool {
        if self.nodes.is_empty() {
            return false;
        }
        let (inv_dir, dir_is_neg) = traversal_setup(ray);
        let mut to_visit_offset: usize = 0;
        let mut current_node_index: usize = 0;
        let mut nodes_to_visit: [u32; MAX_TODO] = [0_u32; MAX_TODO];
        loop {
            let node: &LinearBVHNode = &self.nodes[current_node_index];
            if node.bounds.intersect_p(ray, &inv_dir, &dir_is_neg) {
                // process BVH node _node_ for traversal
                if node.is_leaf() {
                    for primitive in &self.primitives[node.offset..(node.offset + node.n_primitives)]
                    {
                        if primitive.intersect_p(ray) {
                            return true;
                        }
                    }
                    if to_visit_offset == 0 {
                        break;
                    }
                    to_visit_offset -= 1;
                    current_node_index = nodes_to_visit[to_visit_offset] as usize;
                } else {
                    if dir_is_neg[node.axis as usize] == 1_u8 {
                        nodes_to_visit[to_visit_offset] = (current_node_index + 1) as u32;
                        current_node_index = node.offset;
                    } else {
                        nodes_to_visit[to_visit_offset] = node.offset as u32;
                        current_node_index += 1;
                    }
                    to_visit_offset += 1;
                }
            } else {
                if to_visit_offset == 0 {
                    break;
                }
                to_visit_offset -= 1;
                current_node_index = nodes_to_visit[to_visit_offset] as usize;
            }
        }
        false
    }
    fn get_name(&self) -> &str {
        &self.name
    }
    fn as_aggregate(&self) -> Option<&dyn Aggregate> {
        Some(self)
    }
}

impl Aggregate for BVHAccel {
    fn find_primitive(&self, name: &str) -> Option<Arc<dyn Primitive + Send + Sync>> {
        find_in_primitives(&self.primitives, name)
    }
}
