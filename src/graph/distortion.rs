use crate::dsp::distortion::{table_shape, Shape};
use crate::dsp::waveform::Wavetable;
use crate::graph::node::UGen;
use crate::graph::port::{InputSpec, Ports};

/*
Waveshaping Distortion
======================

Disto pushes each sample through a transfer curve, scaled by `drive`:

    audio ──▶ × drive ──▶ curve ──▶ out

Two kinds of curve:

  Shape  the closed-form soft / hard / foldback shapers
  Table  any Wavetable read across [-1, 1]; inputs past ±1 saturate and
         the result is divided by drive so hotter settings stay level

Drive is a CONTROL port, so it can be swept by a Line or an LFO.

Stock tables:

  diode()       flat at -1, linear ramp through the middle, flat at +1
  square()      hard switch at 0
  trunc_sine()  inverted middle half of a sine cycle
*/

pub enum Curve {
    Shape(Shape),
    Table(Wavetable),
}

pub struct Disto {
    curve: Curve,
    drive: f32,
}

impl Disto {
    pub const AUDIO: usize = 0;
    pub const DRIVE: usize = 1;

    pub fn new(curve: Curve, drive: f32) -> Self {
        Self { curve, drive }
    }

    pub fn soft(drive: f32) -> Self {
        Self::new(Curve::Shape(Shape::Soft), drive)
    }

    pub fn table(table: Wavetable, drive: f32) -> Self {
        Self::new(Curve::Table(table), drive)
    }

    pub fn set_curve(&mut self, curve: Curve) {
        self.curve = curve;
    }

    pub fn diode() -> Wavetable {
        Wavetable::gen7(512, &[-1.0, -1.0, 1.0, 1.0], &[128, 256, 128])
    }

    pub fn square() -> Wavetable {
        Wavetable::gen7(512, &[-1.0, -1.0, 1.0, 1.0], &[256, 0, 256])
    }

    pub fn trunc_sine() -> Wavetable {
        let sine = Wavetable::gen10(512, &[1.0]);
        let mut table = Wavetable::new(sine.samples()[128..384].to_vec());
        table.invert();
        table
    }
}

impl UGen for Disto {
    fn inputs(&self) -> Vec<InputSpec> {
        vec![
            InputSpec::audio("audio"),
            InputSpec::control("drive", self.drive),
        ]
    }

    fn generate(&mut self, inputs: &Ports, out: &mut [f32]) {
        let drive = inputs.value(Self::DRIVE);
        let audio = inputs.values(Self::AUDIO);
        match &self.curve {
            Curve::Shape(shape) => {
                for (sample, input) in out.iter_mut().zip(audio) {
                    *sample = shape.apply(*input, drive);
                }
            }
            Curve::Table(table) => {
                for (sample, input) in out.iter_mut().zip(audio) {
                    *sample = table_shape(*input, drive, table);
                }
            }
        }
    }
}
