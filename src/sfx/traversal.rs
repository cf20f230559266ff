//! 帧树遍历
//!
//! 深度优先先序遍历，子帧按树给出的顺序访问，每个帧恰好访问一次。
//! 使用显式栈，树的深度不受调用栈限制。

use super::render::SfxResources;
use crate::render::SfxRenderBackend;
use crate::scene::{FrameId, FrameTree};

/// 一次遍历的统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TraversalStats {
    /// 访问的帧数
    pub frames_visited: usize,
    /// 拥有特效池的帧数
    pub pools_visited: usize,
    /// 处理的活跃特效数
    pub effects: usize,
    /// 本次过期的特效数
    pub expired: usize,
}

/// 以 `root` 为根的子树的先序访问顺序
pub fn preorder<T: FrameTree + ?Sized>(tree: &T, root: FrameId) -> Vec<FrameId> {
    let mut order = Vec::new();
    let mut stack = vec![root];
    while let Some(frame) = stack.pop() {
        order.push(frame);
        stack.extend(tree.children(frame).iter().rev().copied());
    }
    order
}

/// 推进整棵帧树中所有特效
pub fn time_step_all<T: FrameTree + ?Sized>(
    tree: &mut T,
    root: FrameId,
    time_step: f32,
) -> TraversalStats {
    let frames = preorder(tree, root);
    let mut stats = TraversalStats {
        frames_visited: frames.len(),
        ..Default::default()
    };
    for frame in frames {
        let Some(Some(pool)) = tree.sfx_pool_slot(frame) else {
            continue;
        };
        stats.pools_visited += 1;
        for sfx in pool.slots_mut() {
            if sfx.is_active() {
                stats.effects += 1;
                if sfx.time_step_update(time_step) {
                    stats.expired += 1;
                }
            }
        }
    }

    tracing::trace!(
        target: "sfx",
        frames = stats.frames_visited,
        effects = stats.effects,
        expired = stats.expired,
        "Sfx time step"
    );
    stats
}

/// 渲染整棵帧树中所有活跃特效
///
/// 每个拥有池的帧只解析一次到相机帧的变换。
pub fn render_all<T, B>(
    tree: &T,
    root: FrameId,
    camera: FrameId,
    backend: &mut B,
    resources: &SfxResources,
) -> TraversalStats
where
    T: FrameTree + ?Sized,
    B: SfxRenderBackend + ?Sized,
{
    let frames = preorder(tree, root);
    let mut stats = TraversalStats {
        frames_visited: frames.len(),
        ..Default::default()
    };
    for frame in frames {
        let Some(pool) = tree.sfx_pool(frame) else {
            continue;
        };
        stats.pools_visited += 1;
        let transform = tree.frame_transform(frame, camera);
        for (_, sfx) in pool.iter_active() {
            sfx.render(backend, resources, &transform);
            stats.effects += 1;
        }
    }

    tracing::trace!(
        target: "sfx",
        frames = stats.frames_visited,
        effects = stats.effects,
        "Sfx render"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SfxConfig;
    use crate::render::{CommandRecorder, RenderCommand};
    use crate::scene::{Body, FrameGraph};
    use crate::sfx::{SfxPool, SfxService, SfxType};
    use glam::{DAffine3, DQuat, DVec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;

    /// 记录每次变换查询来源帧的帧树
    struct TransformLog {
        graph: FrameGraph,
        calls: RefCell<Vec<FrameId>>,
    }

    impl FrameTree for TransformLog {
        fn children(&self, frame: FrameId) -> &[FrameId] {
            self.graph.children(frame)
        }

        fn sfx_pool(&self, frame: FrameId) -> Option<&SfxPool> {
            self.graph.sfx_pool(frame)
        }

        fn sfx_pool_slot(&mut self, frame: FrameId) -> Option<&mut Option<SfxPool>> {
            self.graph.sfx_pool_slot(frame)
        }

        fn frame_transform(&self, from: FrameId, to: FrameId) -> DAffine3 {
            self.calls.borrow_mut().push(from);
            self.graph.frame_transform(from, to)
        }
    }

    #[test]
    fn test_visits_every_frame_once() {
        let mut graph = FrameGraph::new("root");
        let root = graph.root();
        let mut parent = root;
        // 深链
        for i in 0..5000 {
            parent = graph
                .add_child(parent, format!("f{i}"), DVec3::ZERO, DQuat::IDENTITY)
                .unwrap();
        }
        let stats = time_step_all(&mut graph, root, 0.1);
        assert_eq!(stats.frames_visited, 5001);
        assert_eq!(stats.pools_visited, 0);
    }

    #[test]
    fn test_preorder_child_order() {
        let mut graph = FrameGraph::new("root");
        let root = graph.root();
        let a = graph.add_child(root, "a", DVec3::ZERO, DQuat::IDENTITY).unwrap();
        let b = graph.add_child(root, "b", DVec3::ZERO, DQuat::IDENTITY).unwrap();
        let a1 = graph.add_child(a, "a1", DVec3::ZERO, DQuat::IDENTITY).unwrap();

        assert_eq!(preorder(&graph, root), vec![root, a, a1, b]);
    }

    #[test]
    fn test_time_step_counts_expired() {
        let mut graph = FrameGraph::new("root");
        let body = Body::new(graph.root(), DVec3::ZERO, DVec3::ZERO);
        let config = SfxConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        SfxService::add_impulse(&mut graph, &config, &body, SfxType::Explosion, &mut rng);
        SfxService::add_impulse(&mut graph, &config, &body, SfxType::Damage, &mut rng);

        let stats = time_step_all(&mut graph, body.frame, 1.0);
        assert_eq!(stats.effects, 2);
        assert_eq!(stats.expired, 1);
        assert_eq!(SfxService::active_count(&graph, body.frame), 1);
    }

    #[test]
    fn test_render_uses_camera_relative_position() {
        let mut graph = FrameGraph::new("root");
        let root = graph.root();
        let ship = graph
            .add_child(root, "ship", DVec3::new(100.0, 0.0, 0.0), DQuat::IDENTITY)
            .unwrap();
        let camera = graph
            .add_child(root, "camera", DVec3::new(0.0, 0.0, 50.0), DQuat::IDENTITY)
            .unwrap();

        let body = Body::new(ship, DVec3::new(1.0, 0.0, 0.0), DVec3::ZERO);
        let mut rng = StdRng::seed_from_u64(3);
        SfxService::add_trail(
            &mut graph,
            &SfxConfig::default(),
            &body,
            SfxType::Smoke,
            10.0,
            DVec3::ZERO,
            &mut rng,
        );

        let mut recorder = CommandRecorder::new();
        let resources = SfxResources::new(&mut recorder, &SfxConfig::default());
        let stats = render_all(&graph, root, camera, &mut recorder, &resources);
        assert_eq!(stats.frames_visited, 3);
        assert_eq!(stats.effects, 1);

        let translation = recorder
            .commands()
            .iter()
            .find_map(|c| match c {
                RenderCommand::SetTransform(m) => Some(m.w_axis.truncate()),
                _ => None,
            })
            .unwrap();
        assert!((translation - glam::Vec3::new(101.0, 0.0, -50.0)).length() < 1e-4);
    }

    #[test]
    fn test_render_resolves_transform_once_per_pool_frame() {
        let mut graph = FrameGraph::new("root");
        let root = graph.root();
        let busy = graph.add_child(root, "busy", DVec3::X, DQuat::IDENTITY).unwrap();
        let empty = graph.add_child(root, "empty", DVec3::Y, DQuat::IDENTITY).unwrap();
        let quiet = graph.add_child(empty, "quiet", DVec3::Z, DQuat::IDENTITY).unwrap();

        let config = SfxConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let body = Body::new(busy, DVec3::ZERO, DVec3::ZERO);
        for _ in 0..50 {
            SfxService::add_impulse(&mut graph, &config, &body, SfxType::Damage, &mut rng);
        }
        let body = Body::new(quiet, DVec3::ZERO, DVec3::ZERO);
        SfxService::add_impulse(&mut graph, &config, &body, SfxType::Explosion, &mut rng);

        let tree = TransformLog {
            graph,
            calls: RefCell::new(Vec::new()),
        };
        let mut recorder = CommandRecorder::new();
        let resources = SfxResources::new(&mut recorder, &config);
        let stats = render_all(&tree, root, root, &mut recorder, &resources);

        assert_eq!(stats.effects, 51);
        assert_eq!(stats.pools_visited, 2);
        // 没有池的根帧和 empty 帧不查询变换
        assert_eq!(*tree.calls.borrow(), vec![busy, quiet]);
    }
}
