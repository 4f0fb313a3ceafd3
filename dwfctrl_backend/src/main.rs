use clap::{Parser, ValueEnum};
use dwf_backend::ffi::*;
use dwfctrl_backend::{Application, DeviceId, DeviceInfo};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Transport {
    All,
    Usb,
    Network,
    Axi,
    Remote,
    Demo,
}

impl Transport {
    fn enum_filter(self) -> DwfEnumFilter {
        match self {
            Transport::All => ENUMFILTER_ALL,
            Transport::Usb => ENUMFILTER_USB,
            Transport::Network => ENUMFILTER_NETWORK,
            Transport::Axi => ENUMFILTER_AXI,
            Transport::Remote => ENUMFILTER_REMOTE,
            Transport::Demo => ENUMFILTER_DEMO,
        }
    }
}

/// Lists the WaveForms devices attached to this machine.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Only list devices reached through this transport
    #[arg(short, long, value_enum, default_value = "all")]
    transport: Transport,

    /// Only list devices of this product, e.g. "ad2" or "digital-discovery"
    #[arg(short, long)]
    device: Option<String>,

    /// Also print the configurations of every device
    #[arg(long)]
    configs: bool,
}

fn print_configurations(info: &DeviceInfo) {
    println!(
        "    {:>3} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5} {:>9} {:>9} {:>9} {:>9}",
        "cfg", "AI", "AO", "AIO", "DI", "DO", "DIO", "AI buf", "AO buf", "DI buf", "DO buf"
    );
    for config in &info.configurations {
        println!(
            "    {:>3} {:>5} {:>5} {:>5} {:>5} {:>5} {:>5} {:>9} {:>9} {:>9} {:>9}",
            config.index,
            config.analog_in_channel_count,
            config.analog_out_channel_count,
            config.analog_io_channel_count,
            config.digital_in_channel_count,
            config.digital_out_channel_count,
            config.digital_io_channel_count,
            config.analog_in_buffer_size,
            config.analog_out_buffer_size,
            config.digital_in_buffer_size,
            config.digital_out_buffer_size,
        );
        if !config.text_info.is_empty() {
            for line in config.text_info.lines() {
                println!("        {}", line);
            }
        }
    }
}

fn run(args: &Args) -> dwfctrl_backend::Result<()> {
    let app = Application::shared()?;
    println!("DWF version: {}", app.version()?);

    let device_id = args.device.as_deref().map(str::parse::<DeviceId>).transpose()?;
    let devices: Vec<DeviceInfo> = app
        .enumerate(args.transport.enum_filter())?
        .into_iter()
        .filter(|info| device_id.is_none() || info.device_id() == device_id)
        .collect();
    if devices.is_empty() {
        println!("No devices found");
        return Ok(());
    }
    println!("{:>5}  {:<24} {:<16} {:<6}", "index", "name", "serial", "opened");
    for info in &devices {
        println!(
            "{:>5}  {:<24} {:<16} {:<6}",
            info.index,
            format!("{} rev {}", info.name, info.revision_letter()),
            info.serial_number,
            if info.is_open { "yes" } else { "no" }
        );
        if args.configs {
            print_configurations(info);
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(err) = run(&args) {
        log::error!("{}", err);
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
