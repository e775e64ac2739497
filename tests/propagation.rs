mod common;

use common::{Counter, Recorder, Splitter};
use ugen_graph::graph::{InputKind, Summer};
use ugen_graph::{Graph, OutputConfig, PortId};

#[test]
fn channel_count_reaches_audio_ports_and_upstream() {
    let mut graph = Graph::default();
    let source = graph.add(Recorder::default());
    let control_source = graph.add(Counter::default());
    let node = graph.add(Recorder::default());
    graph.patch(source, node).unwrap();
    graph
        .patch_port(control_source, PortId::new(node, Recorder::CONTROL))
        .unwrap();

    graph.set_channel_count(node, 4).unwrap();

    let ports = graph.ports(node).unwrap();
    for port in ports.iter() {
        let expected = match port.kind() {
            InputKind::Audio => 4,
            InputKind::Control => 1,
        };
        assert_eq!(port.channel_count(), expected, "port {}", port.name());
    }
    assert_eq!(graph.channel_count(node).unwrap(), 4);
    assert_eq!(graph.channel_count(source).unwrap(), 4);
    assert_eq!(graph.channel_count(control_source).unwrap(), 1);

    let recorder = graph.node::<Recorder>(node).unwrap();
    assert_eq!(recorder.channel_changes, vec![1, 4]);
}

#[test]
fn repeated_channel_count_does_not_refire_hook() {
    let mut graph = Graph::default();
    let node = graph.add(Recorder::default());
    graph.set_channel_count(node, 2).unwrap();
    graph.set_channel_count(node, 2).unwrap();
    assert_eq!(graph.node::<Recorder>(node).unwrap().channel_changes, vec![1, 2]);
}

#[test]
fn patch_into_audio_port_adopts_consumer_width() {
    let mut graph = Graph::default();
    let node = graph.add(Recorder::default());
    graph.set_channel_count(node, 2).unwrap();
    let source = graph.add(Recorder::default());
    graph.patch(source, node).unwrap();
    assert_eq!(graph.channel_count(source).unwrap(), 2);
}

#[test]
fn zero_channels_is_ignored() {
    let mut graph = Graph::default();
    let node = graph.add(Recorder::default());
    graph.set_channel_count(node, 0).unwrap();
    assert_eq!(graph.channel_count(node).unwrap(), 1);
}

#[test]
fn sample_rate_flows_upstream_once_per_change() {
    let mut graph = Graph::default();
    let leaf = graph.add(Recorder::default());
    let middle = graph.add(Recorder::default());
    let top = graph.add(Recorder::default());
    graph.patch(leaf, middle).unwrap();
    graph.patch(middle, top).unwrap();

    graph.set_sample_rate(top, 48_000.0).unwrap();
    graph.set_sample_rate(top, 48_000.0).unwrap();
    graph.set_sample_rate(top, 96_000.0).unwrap();

    for id in [leaf, middle, top] {
        assert_eq!(graph.sample_rate(id).unwrap(), 96_000.0);
        assert_eq!(
            graph.node::<Recorder>(id).unwrap().rate_changes,
            vec![48_000.0, 96_000.0]
        );
    }
}

#[test]
fn rate_change_stops_at_unchanged_nodes_but_reaches_new_ones() {
    let mut graph = Graph::default();
    let a = graph.add(Recorder::default());
    let b = graph.add(Recorder::default());
    graph.set_sample_rate(b, 44_100.0).unwrap();
    graph.patch(a, b).unwrap();
    assert_eq!(graph.sample_rate(a).unwrap(), 44_100.0);
    assert_eq!(graph.node::<Recorder>(a).unwrap().rate_changes, vec![44_100.0]);
    assert_eq!(graph.node::<Recorder>(b).unwrap().rate_changes, vec![44_100.0]);
}

#[test]
fn unconfigured_consumer_leaves_producer_rate_alone() {
    let mut graph = Graph::default();
    let a = graph.add(Recorder::default());
    let b = graph.add(Recorder::default());
    graph.set_sample_rate(a, 22_050.0).unwrap();
    graph.patch(a, b).unwrap();
    assert_eq!(graph.sample_rate(a).unwrap(), 22_050.0);
    assert_eq!(graph.sample_rate(b).unwrap(), 0.0);
}

#[test]
fn invalid_rates_are_ignored() {
    let mut graph = Graph::default();
    let node = graph.add(Recorder::default());
    graph.set_sample_rate(node, -1.0).unwrap();
    graph.set_sample_rate(node, f32::NAN).unwrap();
    assert_eq!(graph.sample_rate(node).unwrap(), 0.0);
    assert!(graph.node::<Recorder>(node).unwrap().rate_changes.is_empty());
}

#[test]
fn output_configuration_cascades_through_the_graph() {
    let mut graph = Graph::new(OutputConfig::new(44_100.0, 1)).unwrap();
    let source = graph.add(Recorder::default());
    let mix = graph.add(Summer::new());
    graph.patch(source, mix).unwrap();
    graph.patch_output(mix).unwrap();

    graph
        .configure_output(OutputConfig::new(48_000.0, 2))
        .unwrap();

    for id in [graph.output(), mix, source] {
        assert_eq!(graph.sample_rate(id).unwrap(), 48_000.0);
        assert_eq!(graph.channel_count(id).unwrap(), 2);
    }
    let recorder = graph.node::<Recorder>(source).unwrap();
    assert_eq!(recorder.rate_changes, vec![44_100.0, 48_000.0]);
    assert_eq!(recorder.channel_changes, vec![1, 2]);
}

#[test]
fn stereo_frames_render_per_channel() {
    let mut graph = Graph::new(OutputConfig::new(1000.0, 2)).unwrap();
    let counter = graph.add(Counter::default());
    graph.patch_output(counter).unwrap();

    let mut buffer = [0.0f32; 7];
    graph.render_interleaved(&mut buffer);
    // Three full frames; the odd trailing sample is zeroed.
    assert_eq!(buffer, [1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 0.0]);
}

#[test]
fn shared_producers_are_resized_once() {
    // Every level feeds both ports of the level above it. Walking each edge
    // separately would visit the bottom 2^40 times.
    const DEPTH: usize = 40;
    let mut graph = Graph::new(OutputConfig::new(1000.0, 1)).unwrap();
    let levels: Vec<_> = (0..DEPTH).map(|_| graph.add(Splitter::default())).collect();
    for pair in levels.windows(2) {
        let (upper, lower) = (pair[0], pair[1]);
        graph
            .patch_port(lower, PortId::new(upper, Splitter::LEFT))
            .unwrap();
        graph
            .patch_port(lower, PortId::new(upper, Splitter::RIGHT))
            .unwrap();
    }
    graph.patch_output(levels[0]).unwrap();

    graph.set_channel_count(levels[0], 2).unwrap();

    for &id in &levels {
        assert_eq!(graph.channel_count(id).unwrap(), 2);
        assert_eq!(
            graph.node::<Splitter>(id).unwrap().channel_changes,
            vec![1, 2]
        );
    }

    let mut frame = [0.0f32; 2];
    graph.tick(levels[0], &mut frame);
    assert_eq!(frame, [0.0, 0.0]);
}

#[test]
fn bus_setters_reconfigure_the_output() {
    let mut graph = Graph::new(OutputConfig::new(1000.0, 2)).unwrap();
    let counter = graph.add(Counter::default());
    graph.patch_output(counter).unwrap();

    graph.set_channel_count(graph.output(), 1).unwrap();
    assert_eq!(graph.config().channels, 1);
    assert_eq!(graph.channel_count(graph.output()).unwrap(), 1);
    assert_eq!(graph.channel_count(counter).unwrap(), 1);

    let mut buffer = [9.0f32; 4];
    graph.render_interleaved(&mut buffer);
    assert_eq!(buffer, [1.0, 2.0, 3.0, 4.0]);

    graph.set_sample_rate(graph.output(), 48_000.0).unwrap();
    assert_eq!(graph.config().sample_rate, 48_000.0);
    assert_eq!(graph.sample_rate(counter).unwrap(), 48_000.0);

    // Invalid values leave the output format alone.
    graph.set_channel_count(graph.output(), 0).unwrap();
    graph.set_sample_rate(graph.output(), -1.0).unwrap();
    assert_eq!(graph.config().channels, 1);
    assert_eq!(graph.config().sample_rate, 48_000.0);
}

#[test]
fn tick_zeroes_samples_past_the_node_width() {
    let mut graph = Graph::default();
    let counter = graph.add(Counter::default());
    let mut frame = [9.0f32; 3];
    graph.tick(counter, &mut frame);
    assert_eq!(frame, [1.0, 0.0, 0.0]);
}
