//! Tests for list buffers, record packing and GpuDriver, using a mock queue.

mod common;

use bumplight_core::gpu::header::PolyContext;
use bumplight_core::gpu::list::{ListBuffer, ListError};
use bumplight_core::gpu::registers::{self, HEADER_PAD};
use bumplight_core::gpu::texture::{size_code, TextureHandle, TextureInfo};
use bumplight_core::gpu::vertex::VertexRecord;
use bumplight_core::gpu::{GpuDriver, GpuError};
use bumplight_core::render::{Material, Tile};
use bumplight_hal::{ListKind, Record, RECORD_BYTES};
use common::{list_memory, MockQueue, QueueEvent};
use glam::{Vec3, Vec4};

fn vertex_record(i: u32) -> Record {
    Record([registers::CMD_VERTEX, i, 0, 0, 0, 0, 0, 0])
}

fn texture_32() -> TextureInfo {
    TextureInfo {
        width: 32,
        height: 32,
        format: 0,
        handle: TextureHandle(0x0001_0000),
    }
}

mod list_buffer {
    use super::*;

    #[test]
    fn exact_fit_then_overflow() {
        let n = 6;
        let mut mem = list_memory(n);
        let mut list = ListBuffer::new(ListKind::Opaque, &mut mem);
        list.begin();
        for i in 0..n {
            list.push(vertex_record(i as u32)).unwrap();
        }
        assert_eq!(list.remaining(), 0);
        assert_eq!(list.pending_bytes(), n * RECORD_BYTES);

        let err = list.push(vertex_record(99)).unwrap_err();
        assert_eq!(
            err,
            ListError::Overflow {
                list: ListKind::Opaque,
                capacity_bytes: n * RECORD_BYTES,
                requested_bytes: (n + 1) * RECORD_BYTES,
            }
        );
        // Nothing past the last record was touched.
        assert_eq!(list.pending().len(), n);
        assert_eq!(list.pending()[n - 1], vertex_record(n as u32 - 1));
    }

    #[test]
    fn push_requires_begin() {
        let mut mem = list_memory(4);
        let mut list = ListBuffer::new(ListKind::Translucent, &mut mem);
        assert_eq!(
            list.push(vertex_record(0)),
            Err(ListError::NotOpen(ListKind::Translucent))
        );
    }

    #[test]
    fn commit_advances_tail() {
        let mut mem = list_memory(8);
        let mut list = ListBuffer::new(ListKind::Opaque, &mut mem);
        list.begin();
        list.push(vertex_record(0)).unwrap();
        list.push(vertex_record(1)).unwrap();
        assert_eq!(list.commit().len(), 2);

        list.begin();
        list.push(vertex_record(2)).unwrap();
        let second = list.commit();
        assert_eq!(second, &[vertex_record(2)]);
        assert_eq!(list.stats().published_bytes, 3 * RECORD_BYTES);
    }

    #[test]
    fn abandon_rewinds_to_tail() {
        let mut mem = list_memory(8);
        let mut list = ListBuffer::new(ListKind::Opaque, &mut mem);
        list.begin();
        list.push(vertex_record(0)).unwrap();
        list.commit();
        list.begin();
        list.push(vertex_record(1)).unwrap();
        list.abandon();
        assert!(!list.is_open());
        assert_eq!(list.remaining(), 7);
        assert_eq!(list.stats().published_bytes, RECORD_BYTES);
    }

    #[test]
    fn prefetch_hint_for_each_following_slot() {
        let mut mem = list_memory(4);
        let mut list = ListBuffer::new(ListKind::Opaque, &mut mem);
        list.begin();
        for i in 0..4 {
            list.push(vertex_record(i)).unwrap();
        }
        // No hint after the last slot.
        assert_eq!(list.stats().prefetch_hints, 3);
        assert_eq!(list.stats().records, 4);
    }

    #[test]
    fn reset_frees_everything() {
        let mut mem = list_memory(2);
        let mut list = ListBuffer::new(ListKind::Opaque, &mut mem);
        list.begin();
        list.push(vertex_record(0)).unwrap();
        list.push(vertex_record(1)).unwrap();
        list.commit();
        list.reset();
        assert_eq!(list.remaining(), 2);
        assert_eq!(list.stats(), Default::default());
    }
}

mod headers {
    use super::*;

    #[test]
    fn untextured_opaque() {
        let h = PolyContext::opaque_surface(None).compile();
        assert_eq!(h.cmd, 0x8084_0002);
        assert_eq!(h.mode1, 0x9000_0000);
        assert_eq!(h.mode2, 0x2080_0000);
        assert_eq!(h.mode3, 0);
        assert_eq!(h.list_type(), 0);
    }

    #[test]
    fn textured_opaque() {
        let h = PolyContext::opaque_surface(Some(texture_32())).compile();
        assert_eq!(h.cmd, 0x8084_000A);
        assert_eq!(h.mode1, 0x9200_0000);
        assert_eq!(h.mode2, 0x2080_24D2);
        assert_eq!(h.mode3, 0x0000_2000);
    }

    #[test]
    fn bump_overlay() {
        let h = PolyContext::bump_overlay(texture_32()).compile();
        assert_eq!(h.list_type(), 2);
        assert_eq!(h.cmd, 0x8284_000E);
        assert_eq!(h.mode1, 0x9600_0000);
        assert_eq!(h.mode2, 0x9490_24D2);
        assert_eq!(h.mode3, 0x0000_2000);
    }

    #[test]
    fn format_code_lands_in_mode3() {
        let tex = TextureInfo {
            format: 5 << registers::TXRFMT_PIXEL_SHIFT,
            ..texture_32()
        };
        let h = PolyContext::opaque_surface(Some(tex)).compile();
        assert_eq!(h.mode3, 0x2800_2000);
        assert_eq!(tex.pixel_class(), registers::TXRFMT_PIXEL_PAL4BPP);
    }

    #[test]
    fn record_layout_pads_with_ones() {
        let h = PolyContext::opaque_surface(None).compile();
        let r = h.to_record();
        assert_eq!(&r.0[..4], &[h.cmd, h.mode1, h.mode2, h.mode3]);
        assert_eq!(&r.0[4..], &[HEADER_PAD; 4]);
    }

    #[test]
    fn texture_size_codes() {
        assert_eq!(size_code(8), 0);
        assert_eq!(size_code(32), 2);
        assert_eq!(size_code(256), 5);
        assert_eq!(size_code(1024), 7);
        assert_eq!(size_code(4), 0);
        assert_eq!(size_code(48), 3);
        assert_eq!(size_code(4096), 7);
    }
}

mod vertices {
    use super::*;

    #[test]
    fn packs_transformed_position_color_and_offset() {
        let mut tile = Tile::new(0.0, 0.0, 1.0, 32.0, 32.0, Material::default());
        let v = &mut tile.vertices[3];
        v.transformed = Vec4::new(5.0, 6.0, 7.0, 1.0);
        v.color = Vec3::new(1.0, 0.5, 0.0);
        v.offset_color = 0x0102_0304;

        let record = VertexRecord::from_vertex(&tile.vertices[3]).to_record();
        assert_eq!(record.0[0], registers::CMD_VERTEX_EOL);
        assert_eq!(f32::from_bits(record.0[1]), 5.0);
        assert_eq!(f32::from_bits(record.0[2]), 6.0);
        assert_eq!(f32::from_bits(record.0[3]), 7.0);
        assert_eq!(f32::from_bits(record.0[4]), 1.0);
        assert_eq!(f32::from_bits(record.0[5]), 1.0);
        assert_eq!(record.0[6], 0xFFFF_7F00);
        assert_eq!(record.0[7], 0x0102_0304);
    }

    #[test]
    fn strip_vertices_use_plain_command() {
        let tile = Tile::new(0.0, 0.0, 1.0, 32.0, 32.0, Material::default());
        for vertex in &tile.vertices[..3] {
            assert_eq!(VertexRecord::from_vertex(vertex).flags, registers::CMD_VERTEX);
        }
    }

    #[test]
    fn record_round_trip() {
        let tile = Tile::new(3.0, 4.0, 1.0, 32.0, 32.0, Material::default());
        let packed = VertexRecord::from(&tile.vertices[1]);
        assert_eq!(VertexRecord::from_record(&packed.to_record()), packed);
    }
}

mod driver {
    use super::*;

    #[test]
    fn publishes_exact_byte_count() {
        let n = 10;
        let queue = MockQueue::new();
        let mut opaque = list_memory(n);
        let mut translucent = list_memory(1);
        let mut gpu = GpuDriver::new(queue.clone(), &mut opaque, &mut translucent);

        gpu.begin_scene().unwrap();
        gpu.begin_list(ListKind::Opaque).unwrap();
        for i in 0..n {
            gpu.write_record(vertex_record(i as u32)).unwrap();
        }
        assert_eq!(gpu.end_list().unwrap(), n * RECORD_BYTES);
        gpu.finish_scene().unwrap();

        assert_eq!(queue.published(ListKind::Opaque).len(), n);
        assert_eq!(
            queue.events().last(),
            Some(&QueueEvent::SceneFinish)
        );
    }

    #[test]
    fn overflow_is_reported_not_truncated() {
        let n = 4;
        let queue = MockQueue::new();
        let mut opaque = list_memory(n);
        let mut translucent = list_memory(1);
        let mut gpu = GpuDriver::new(queue.clone(), &mut opaque, &mut translucent);

        gpu.begin_scene().unwrap();
        gpu.begin_list(ListKind::Opaque).unwrap();
        for i in 0..n {
            gpu.write_record(vertex_record(i as u32)).unwrap();
        }
        let err = gpu.write_record(vertex_record(4)).unwrap_err();
        assert!(matches!(
            err,
            GpuError::List(ListError::Overflow {
                list: ListKind::Opaque,
                ..
            })
        ));
        gpu.abandon_list();
        assert!(queue.published(ListKind::Opaque).is_empty());
        assert_eq!(gpu.stats(ListKind::Opaque).published_bytes, 0);
    }

    #[test]
    fn abort_drops_open_scene_once() {
        let queue = MockQueue::new();
        let mut opaque = list_memory(2);
        let mut translucent = list_memory(2);
        let mut gpu = GpuDriver::new(queue.clone(), &mut opaque, &mut translucent);

        gpu.abort_scene();
        assert!(queue.events().is_empty());

        gpu.begin_scene().unwrap();
        gpu.begin_list(ListKind::Opaque).unwrap();
        gpu.write_record(vertex_record(0)).unwrap();
        gpu.abort_scene();
        gpu.abort_scene();
        assert_eq!(
            queue.events(),
            vec![QueueEvent::SceneBegin, QueueEvent::SceneAbort]
        );
        assert!(!gpu.scene_open());
        assert_eq!(gpu.open_list(), None);
        gpu.begin_scene().unwrap();
    }

    #[test]
    fn empty_list_is_not_published() {
        let queue = MockQueue::new();
        let mut opaque = list_memory(2);
        let mut translucent = list_memory(2);
        let mut gpu = GpuDriver::new(queue.clone(), &mut opaque, &mut translucent);

        gpu.begin_scene().unwrap();
        gpu.begin_list(ListKind::Translucent).unwrap();
        assert_eq!(gpu.end_list().unwrap(), 0);
        assert_eq!(queue.events(), vec![QueueEvent::SceneBegin]);
    }

    #[test]
    fn one_list_open_at_a_time() {
        let queue = MockQueue::new();
        let mut opaque = list_memory(2);
        let mut translucent = list_memory(2);
        let mut gpu = GpuDriver::new(queue, &mut opaque, &mut translucent);

        gpu.begin_scene().unwrap();
        gpu.begin_list(ListKind::Opaque).unwrap();
        assert!(matches!(
            gpu.begin_list(ListKind::Translucent),
            Err(GpuError::ListAlreadyOpen(ListKind::Opaque))
        ));
        assert!(matches!(
            gpu.finish_scene(),
            Err(GpuError::ListAlreadyOpen(ListKind::Opaque))
        ));
    }

    #[test]
    fn lists_need_a_scene() {
        let mut opaque = list_memory(2);
        let mut translucent = list_memory(2);
        let mut gpu = GpuDriver::new(MockQueue::new(), &mut opaque, &mut translucent);
        assert!(matches!(
            gpu.begin_list(ListKind::Opaque),
            Err(GpuError::SceneNotOpen)
        ));
    }

    #[test]
    fn records_need_an_open_list() {
        let mut opaque = list_memory(2);
        let mut translucent = list_memory(2);
        let mut gpu = GpuDriver::new(MockQueue::new(), &mut opaque, &mut translucent);
        gpu.begin_scene().unwrap();
        assert!(matches!(
            gpu.write_record(vertex_record(0)),
            Err(GpuError::NoListOpen)
        ));
        assert!(matches!(gpu.end_list(), Err(GpuError::NoListOpen)));
    }

    #[test]
    fn lists_are_independent() {
        let queue = MockQueue::new();
        let mut opaque = list_memory(1);
        let mut translucent = list_memory(4);
        let mut gpu = GpuDriver::new(queue.clone(), &mut opaque, &mut translucent);

        gpu.begin_scene().unwrap();
        gpu.begin_list(ListKind::Opaque).unwrap();
        gpu.write_record(vertex_record(0)).unwrap();
        gpu.end_list().unwrap();

        gpu.begin_list(ListKind::Translucent).unwrap();
        for i in 0..4 {
            gpu.write_record(vertex_record(10 + i)).unwrap();
        }
        gpu.end_list().unwrap();

        assert_eq!(queue.published(ListKind::Opaque), vec![vertex_record(0)]);
        assert_eq!(queue.published(ListKind::Translucent).len(), 4);
    }

    #[test]
    fn transport_errors_propagate() {
        let mut opaque = list_memory(1);
        let mut translucent = list_memory(1);
        let mut gpu = GpuDriver::new(MockQueue::failing_finish(), &mut opaque, &mut translucent);
        gpu.begin_scene().unwrap();
        assert!(matches!(gpu.finish_scene(), Err(GpuError::Transport(_))));
    }

    #[test]
    fn begin_scene_rewinds_lists() {
        let queue = MockQueue::new();
        let mut opaque = list_memory(2);
        let mut translucent = list_memory(1);
        let mut gpu = GpuDriver::new(queue.clone(), &mut opaque, &mut translucent);

        for frame in 0..3 {
            gpu.begin_scene().unwrap();
            gpu.begin_list(ListKind::Opaque).unwrap();
            gpu.write_record(vertex_record(frame)).unwrap();
            gpu.write_record(vertex_record(frame + 100)).unwrap();
            assert_eq!(gpu.end_list().unwrap(), 2 * RECORD_BYTES);
            gpu.finish_scene().unwrap();
        }
        assert_eq!(queue.published(ListKind::Opaque).len(), 6);
    }
}
