use image::RgbaImage;

/// In-place stack blur: an approximate Gaussian built from box-filter
/// accumulation with a triangular weighting kernel, one horizontal and one
/// vertical pass. Edge pixels are clamped, not wrapped. Only the RGB channels
/// are touched; alpha passes through unmodified.
pub fn stack_blur(image: &mut RgbaImage, radius: u32) {
    if radius < 1 {
        return;
    }
    let w = image.width() as usize;
    let h = image.height() as usize;
    if w == 0 || h == 0 {
        return;
    }

    let radius = radius as usize;
    let wm = w - 1;
    let hm = h - 1;
    let wh = w * h;
    let div = radius + radius + 1;
    let r1 = (radius + 1) as i32;

    let mut r = vec![0i32; wh];
    let mut g = vec![0i32; wh];
    let mut b = vec![0i32; wh];
    let mut vmin = vec![0usize; w.max(h)];

    let divsum = {
        let d = (div + 1) >> 1;
        d * d
    };
    let dv: Vec<u8> = (0..256 * divsum).map(|i| (i / divsum) as u8).collect();

    let pixels: &mut [u8] = image;
    let mut stack = vec![[0i32; 3]; div];

    // Horizontal pass; blurred rows land in the r/g/b scratch planes.
    let mut yw = 0usize;
    let mut yi = 0usize;
    for y in 0..h {
        let (mut rinsum, mut ginsum, mut binsum) = (0i32, 0i32, 0i32);
        let (mut routsum, mut goutsum, mut boutsum) = (0i32, 0i32, 0i32);
        let (mut rsum, mut gsum, mut bsum) = (0i32, 0i32, 0i32);

        for i in -(radius as i32)..=(radius as i32) {
            let p = 4 * (yi + (i.max(0) as usize).min(wm));
            let sir = &mut stack[(i + radius as i32) as usize];
            sir[0] = pixels[p] as i32;
            sir[1] = pixels[p + 1] as i32;
            sir[2] = pixels[p + 2] as i32;

            let rbs = r1 - i.abs();
            rsum += sir[0] * rbs;
            gsum += sir[1] * rbs;
            bsum += sir[2] * rbs;
            if i > 0 {
                rinsum += sir[0];
                ginsum += sir[1];
                binsum += sir[2];
            } else {
                routsum += sir[0];
                goutsum += sir[1];
                boutsum += sir[2];
            }
        }
        let mut stackpointer = radius;

        for x in 0..w {
            r[yi] = dv[rsum as usize] as i32;
            g[yi] = dv[gsum as usize] as i32;
            b[yi] = dv[bsum as usize] as i32;

            rsum -= routsum;
            gsum -= goutsum;
            bsum -= boutsum;

            let stackstart = (stackpointer + div - radius) % div;
            {
                let sir = &mut stack[stackstart];
                routsum -= sir[0];
                goutsum -= sir[1];
                boutsum -= sir[2];

                if y == 0 {
                    vmin[x] = (x + radius + 1).min(wm);
                }
                let p = 4 * (yw + vmin[x]);
                sir[0] = pixels[p] as i32;
                sir[1] = pixels[p + 1] as i32;
                sir[2] = pixels[p + 2] as i32;

                rinsum += sir[0];
                ginsum += sir[1];
                binsum += sir[2];
            }

            rsum += rinsum;
            gsum += ginsum;
            bsum += binsum;

            stackpointer = (stackpointer + 1) % div;
            let sir = stack[stackpointer];
            routsum += sir[0];
            goutsum += sir[1];
            boutsum += sir[2];
            rinsum -= sir[0];
            ginsum -= sir[1];
            binsum -= sir[2];

            yi += 1;
        }
        yw += w;
    }

    // Vertical pass; reads the scratch planes and writes back into the image.
    for x in 0..w {
        let (mut rinsum, mut ginsum, mut binsum) = (0i32, 0i32, 0i32);
        let (mut routsum, mut goutsum, mut boutsum) = (0i32, 0i32, 0i32);
        let (mut rsum, mut gsum, mut bsum) = (0i32, 0i32, 0i32);

        let mut yp = -(radius as i32) * w as i32;
        for i in -(radius as i32)..=(radius as i32) {
            let yi = yp.max(0) as usize + x;
            let sir = &mut stack[(i + radius as i32) as usize];
            sir[0] = r[yi];
            sir[1] = g[yi];
            sir[2] = b[yi];

            let rbs = r1 - i.abs();
            rsum += r[yi] * rbs;
            gsum += g[yi] * rbs;
            bsum += b[yi] * rbs;
            if i > 0 {
                rinsum += sir[0];
                ginsum += sir[1];
                binsum += sir[2];
            } else {
                routsum += sir[0];
                goutsum += sir[1];
                boutsum += sir[2];
            }

            if i < hm as i32 {
                yp += w as i32;
            }
        }

        let mut yi = x;
        let mut stackpointer = radius;
        for y in 0..h {
            let p = 4 * yi;
            pixels[p] = dv[rsum as usize];
            pixels[p + 1] = dv[gsum as usize];
            pixels[p + 2] = dv[bsum as usize];

            rsum -= routsum;
            gsum -= goutsum;
            bsum -= boutsum;

            let stackstart = (stackpointer + div - radius) % div;
            {
                let sir = &mut stack[stackstart];
                routsum -= sir[0];
                goutsum -= sir[1];
                boutsum -= sir[2];

                if x == 0 {
                    vmin[y] = (y + radius + 1).min(hm) * w;
                }
                let p = x + vmin[y];
                sir[0] = r[p];
                sir[1] = g[p];
                sir[2] = b[p];

                rinsum += sir[0];
                ginsum += sir[1];
                binsum += sir[2];
            }

            rsum += rinsum;
            gsum += ginsum;
            bsum += binsum;

            stackpointer = (stackpointer + 1) % div;
            let sir = stack[stackpointer];
            routsum += sir[0];
            goutsum += sir[1];
            boutsum += sir[2];
            rinsum -= sir[0];
            ginsum -= sir[1];
            binsum -= sir[2];

            yi += w;
        }
    }
}
