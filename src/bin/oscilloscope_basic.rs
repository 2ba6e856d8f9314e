// Claim a Moku, configure the Oscilloscope frontend and print one frame of channel 1.
//
// The device address comes from MOKU_IP (default 192.168.73.1, i.e. connected to the Moku's own access
// point). Set RUST_LOG=debug to see every request.

use tracing_subscriber::EnvFilter;

use mokurest::devices::moku::Moku;
use mokurest::devices::oscilloscope::{Coupling, Frontend, Impedance, Oscilloscope};
use mokurest::{Config, Session};

fn main() -> mokurest::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    let mut session = Session::connect(&config)?;

    if let Some(key) = session.client_key() {
        println!("Client key: {}", key);
    }

    println!("Name: {}", Moku::new(&session).name()?);

    {
        let osc = Oscilloscope::new(&session);

        let frontend = Frontend::new(1, "10Vpp", Coupling::AC, Impedance::OneMegaOhm)?;
        let applied = osc.set_frontend(&frontend)?;
        println!("Impedance: {:?}", applied.impedance);

        // Trigger point centred in a 2 ms window
        osc.set_timebase(-1e-3, 1e-3)?;

        let frame = osc.get_data(false)?;
        match frame.channel(1) {
            Some(ch1) => println!("{:?}", ch1),
            None => println!("Channel 1 returned no data"),
        }
    }

    session.relinquish_ownership()
}
